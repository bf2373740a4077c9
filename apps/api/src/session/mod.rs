// Session State Machine: the single live session and the generation flow
// (optional research -> asset generation -> optional job match).

pub mod controller;
pub mod handlers;
pub mod machine;
