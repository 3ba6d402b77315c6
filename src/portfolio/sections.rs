use crate::portfolio::Link;
use serde::Deserialize;

/// Static parts of the page around the project gallery. Any of them may be left out.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Sections {
    pub hero: Option<Hero>,
    pub about: Option<About>,
    pub review: Option<Review>,
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hero {
    pub greeting: Option<String>,
    /// Trusted HTML, for highlighted spans.
    pub headline: String,
    pub tagline: Option<String>,
    pub call_to_action: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct About {
    #[serde(default = "default_about_heading")]
    pub heading: String,
    pub intro_heading: Option<String>,
    pub portrait: Option<String>,
    /// Markdown, one entry per paragraph.
    #[serde(default)]
    pub paragraphs: Vec<String>,
    pub facts_heading: Option<String>,
    #[serde(default)]
    pub facts: Vec<Fact>,
    pub skills_heading: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
}

fn default_about_heading() -> String {
    "About & Skills".to_owned()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    #[serde(default = "default_review_heading")]
    pub heading: String,
    /// Markdown, one entry per paragraph.
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

fn default_review_heading() -> String {
    "Looking back".to_owned()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contact {
    #[serde(default = "default_contact_heading")]
    pub heading: String,
    pub description: Option<String>,
    #[serde(default)]
    pub entries: Vec<ContactEntry>,
}

fn default_contact_heading() -> String {
    "Contact".to_owned()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContactEntry {
    pub label: String,
    pub value: String,
    pub href: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_are_optional() {
        let sections: Sections = toml::from_str("title = \"ignored here\"").unwrap();
        assert_eq!(sections, Sections::default());
    }

    #[test]
    fn test_about_with_skills() {
        let sections: Sections = toml::from_str(
            r#"
            [about]
            paragraphs = ["I like **shorts editing**."]

            [[about.facts]]
            label = "Role"
            value = "Frontend developer"

            [[about.skills]]
            name = "Languages"
            skills = ["JavaScript", "HTML5", "CSS3"]
            "#,
        )
        .unwrap();
        let about = sections.about.unwrap();
        assert_eq!(about.heading, "About & Skills");
        assert_eq!(about.facts[0].value, "Frontend developer");
        assert_eq!(about.skills[0].skills.len(), 3);
        assert!(sections.contact.is_none());
    }
}
