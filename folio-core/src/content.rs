use serde::{Deserialize, Serialize};

/// One entry in the skills grid. `percentage` drives the width of the
/// animated proficiency bar and must stay within 0..=100 (checked when a
/// config file is loaded, see [`crate::config::Config::validate`]).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    pub percentage: u8,
    pub color: String,
}

/// One year on the learning timeline. Entries render in declared order,
/// alternating sides of the center line.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub year: String,
    pub technologies: Vec<String>,
    pub description: String,
}

/// A project card. A missing `demo` link suppresses the demo button on the
/// rendered card; `repository` is always shown.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub repository: String,
    #[serde(default)]
    pub demo: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// An education entry shown on the about card.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub location: String,
}

/// The personal copy used by the hero, about and contact sections. Bio
/// paragraphs may contain markdown.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub greeting: String,
    pub headline_lead: String,
    pub headline_accent: String,
    pub tagline: String,
    pub bio: Vec<String>,
    pub bio_heading: String,
    pub education: Education,
    pub email: String,
    pub location: String,
    pub github: String,
    pub linkedin: String,
    pub availability: String,
    pub quote: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Navadeep Reddi".into(),
            greeting: "Hi, I'm Navadeep Reddi 👋".into(),
            headline_lead: "Future".into(),
            headline_accent: "Software Engineer".into(),
            tagline: "Data Science Enthusiast | Building meaningful digital experiences".into(),
            bio: vec![
                "I'm a B.Tech student passionate about building data-driven applications and \
                 meaningful digital experiences. I'm constantly learning and adapting to new \
                 technologies, with a focus on solving real-world problems through code."
                    .into(),
                "My journey in tech is driven by curiosity and the desire to create impactful \
                 solutions. I enjoy exploring the intersection of data science and software \
                 engineering to build intelligent applications that solve real problems."
                    .into(),
            ],
            bio_heading: "I'm a B.Tech student passionate about data-driven applications".into(),
            education: Education {
                degree: "B.Tech in Computer Science and Data Science".into(),
                school: "Kakinada Institute of Engineering and Technology (KIET)".into(),
                location: "Andhra Pradesh".into(),
            },
            email: "navadeepreddisrav@gmail.com".into(),
            location: "East Godavari, Andhra Pradesh, India".into(),
            github: "https://github.com/navadeepreddi".into(),
            linkedin: "https://linkedin.com/in/navadeepreddi".into(),
            availability: "Available for freelance & internships".into(),
            quote: "Let's build something amazing together!".into(),
        }
    }
}

pub fn default_skills() -> Vec<Skill> {
    [
        ("Python", 90, "blue"),
        ("SQL (MySQL/MS SQL Server)", 85, "orange"),
        ("Power BI", 80, "yellow"),
        ("Excel", 75, "green"),
        ("HTML/CSS", 80, "red"),
        ("Java", 70, "purple"),
        ("Git & GitHub", 80, "slate"),
        ("Machine Learning", 75, "primary"),
    ]
    .into_iter()
    .map(|(name, percentage, color)| Skill {
        name: name.into(),
        percentage,
        color: color.into(),
    })
    .collect()
}

pub fn default_timeline() -> Vec<TimelineEntry> {
    [
        (
            "2021",
            &["Python", "SQL"][..],
            "Started my coding journey with Python and databases.",
        ),
        (
            "2022",
            &["Power BI", "Excel"][..],
            "Focused on data analysis tools and visualization.",
        ),
        (
            "2023",
            &["Machine Learning", "GitHub"][..],
            "Explored ML concepts and version control.",
        ),
        (
            "2024",
            &["React", "HTML/CSS"][..],
            "Expanded into web development and front-end technologies.",
        ),
    ]
    .into_iter()
    .map(|(year, tech, description)| TimelineEntry {
        year: year.into(),
        technologies: tech.iter().map(|t| t.to_string()).collect(),
        description: description.into(),
    })
    .collect()
}

pub fn default_projects() -> Vec<Project> {
    vec![
        Project {
            title: "Loan Approval Prediction".into(),
            description: "ML-based web app for loan eligibility prediction using Python, Pandas, \
                          and Streamlit."
                .into(),
            tech: ["Python", "Pandas", "Streamlit", "Machine Learning"]
                .map(String::from)
                .to_vec(),
            repository: "https://github.com/navadeepreddi/loan-approval-prediction".into(),
            demo: Some("https://loan-approval.example.com".into()),
            image: None,
        },
        Project {
            title: "E-commerce Database System".into(),
            description: "Normalized database schema for online retail with ERD and advanced SQL \
                          queries."
                .into(),
            tech: ["MySQL", "Database Design", "SQL"].map(String::from).to_vec(),
            repository: "https://github.com/navadeepreddi/ecommerce-db".into(),
            demo: None,
            image: None,
        },
        Project {
            title: "Power BI Sales Dashboard".into(),
            description: "Interactive KPI dashboard for monthly sales analysis and visualization."
                .into(),
            tech: ["Power BI", "Excel", "Data Analysis"].map(String::from).to_vec(),
            repository: "https://github.com/navadeepreddi/sales-dashboard".into(),
            demo: Some("https://sales-dashboard.example.com".into()),
            image: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_skills_stay_in_bounds() {
        let skills = default_skills();
        assert_eq!(skills.len(), 8);
        assert!(skills.iter().all(|s| s.percentage <= 100));
    }

    #[test]
    fn default_timeline_keeps_declared_order() {
        let years: Vec<_> = default_timeline().into_iter().map(|e| e.year).collect();
        assert_eq!(years, ["2021", "2022", "2023", "2024"]);
    }

    #[test]
    fn one_default_project_has_no_demo() {
        let projects = default_projects();
        assert_eq!(projects.iter().filter(|p| p.demo.is_none()).count(), 1);
    }
}
