use serde::Serialize;

/// Starter profile a student can load into the notes field and edit.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub key: &'static str,
    pub label: &'static str,
    pub text: &'static str,
}

pub static TEMPLATES: [Template; 8] = [
    Template {
        key: "cs-intern",
        label: "CS Internship",
        text: "Target Role: Software Engineering Intern\n\nSkills: Java, Python, React (Self-taught), Git.\nEducation: Junior at State University, CS Major, GPA 3.7.\nProjects: Built a Todo App in React, Python script to scrape weather data.\nInterests: AI, Web Development, Hackathons.\nGoal: Learning best practices, coding in a team environment.",
    },
    Template {
        key: "marketing-fresher",
        label: "Marketing Fresher",
        text: "Target Role: Social Media Marketing Assistant\n\nSkills: Canva, Instagram/TikTok trends, Basic Copywriting, Google Analytics certification.\nEducation: BA in Communications, recently graduated.\nExperience: Managed social media for college drama club (grew followers by 50%).\nPersonality: Creative, outgoing, data-curious.",
    },
    Template {
        key: "data-analyst",
        label: "Jr Data Analyst",
        text: "Target Role: Junior Data Analyst\n\nSkills: Excel (VLOOKUP, Pivot Tables), SQL (Basic), Tableau (Class project).\nEducation: BS in Statistics.\nProject: Analyzed public dataset of Spotify songs to find trends in popularity.\nCertifications: Google Data Analytics Professional Certificate.",
    },
    Template {
        key: "ux-design",
        label: "UX Design Intern",
        text: "Target Role: UX/UI Design Intern\n\nSkills: Figma, Adobe XD, Wireframing, User Research, Prototyping.\nEducation: Final year student in Interaction Design.\nPortfolio: Case study on redesigning a local food delivery app, focusing on accessibility.\nGoal: To work on real user problems and improve design system knowledge.",
    },
    Template {
        key: "project-manager",
        label: "Assoc. Project Manager",
        text: "Target Role: Associate Project Manager\n\nSkills: Agile/Scrum basics, Jira, Trello, Communication, Risk Management.\nEducation: MBA Fresher or Business Degree.\nExperience: Led the student council organizing committee for the annual tech fest (budget managed: $5k).\nStrengths: Leadership, detail-oriented, conflict resolution.",
    },
    Template {
        key: "recruiter",
        label: "Jr Recruiter / Coordinator",
        text: "Target Role: Recruiting Coordinator\n\nSkills: Scheduling, Email Communication, LinkedIn Networking, Basic HR knowledge.\nEducation: BA in Psychology or Human Resources.\nExperience: Internship at a non-profit handling volunteer recruitment.\nPersonality: People-person, organized, high empathy.",
    },
    Template {
        key: "sales-sdr",
        label: "Sales Dev Rep (SDR)",
        text: "Target Role: Sales Development Representative (SDR)\n\nSkills: Cold Calling, Email Outreach, CRM (HubSpot), Resilience, Active Listening.\nEducation: BA in any field.\nBackground: Part-time job in retail sales, consistently exceeded targets.\nMotivation: Money-motivated, competitive, wants a career in tech sales.",
    },
    Template {
        key: "general-intern",
        label: "General Business Intern",
        text: "Target Role: Business Operations Intern\n\nSkills: MS Office Suite, Organization, Research, Event Planning.\nEducation: Business Administration Sophomore.\nVolunteering: Organized campus charity run with 200 participants.\nStrengths: Communication, time management, eager to learn.",
    },
];

pub fn find_template(key: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::machine::extract_target_role;

    #[test]
    fn test_every_template_names_a_target_role() {
        for template in &TEMPLATES {
            assert!(
                extract_target_role(template.text).is_some(),
                "{} has no target role",
                template.key
            );
        }
    }

    #[test]
    fn test_find_template() {
        assert_eq!(find_template("ux-design").unwrap().label, "UX Design Intern");
        assert!(find_template("astronaut").is_none());
    }
}
