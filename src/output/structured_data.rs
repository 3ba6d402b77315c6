use crate::{
    output::Route,
    portfolio::{Portfolio, Project},
};
use serde::Serialize;
use tracing::warn;
use yew::Html;

pub fn write_structured_data<T: Serialize>(data: T) -> Html {
    #[derive(Serialize)]
    struct Context<T> {
        #[serde(rename = "@context")]
        context: &'static str,
        #[serde(flatten)]
        data: T,
    }

    match serde_json::to_string_pretty(&Context {
        context: "https://schema.org",
        data,
    }) {
        Ok(json) => Html::from_html_unchecked(
            format!("<script type=\"application/ld+json\">\n{json}\n</script>").into(),
        ),
        Err(error) => {
            warn!(event = "output.structured_data_failed", error = %error);
            Html::default()
        }
    }
}

/// https://developer.chrome.com/docs/web-platform/prerender-pages
pub fn write_speculation_rules(urls: Vec<String>) -> Html {
    #[derive(Serialize)]
    struct SpeculationRules {
        prerender: Vec<Rule>,
    }

    #[derive(Serialize)]
    #[serde(untagged)]
    enum Rule {
        List {
            urls: Vec<String>,
            eagerness: &'static str,
        },
        Document {
            #[serde(rename = "where")]
            _where: Expr,
            eagerness: &'static str,
        },
    }

    #[derive(Serialize)]
    enum Expr {
        #[serde(rename = "and")]
        And(Vec<Expr>),
        #[serde(rename = "href_matches")]
        HrefMatches(String),
        #[serde(rename = "not")]
        Not(Box<Expr>),
        #[serde(rename = "selector_matches")]
        SelectorMatches(String),
    }

    let rules = SpeculationRules {
        prerender: (!urls.is_empty())
            .then_some(Rule::List {
                urls,
                eagerness: "immediate",
            })
            .into_iter()
            .chain(std::iter::once(Rule::Document {
                // Slide pages are only worth prerendering from their neighbours.
                _where: Expr::And(vec![
                    Expr::HrefMatches("/projects/*".to_owned()),
                    Expr::Not(Box::new(Expr::HrefMatches("/projects/*/slides/*".to_owned()))),
                    Expr::Not(Box::new(Expr::SelectorMatches(
                        "[rel~=nofollow]".to_owned(),
                    ))),
                ]),
                eagerness: "moderate",
            }))
            .collect(),
    };

    match serde_json::to_string_pretty(&rules) {
        Ok(json) => Html::from_html_unchecked(
            format!("<script type=\"speculationrules\">\n{json}\n</script>").into(),
        ),
        Err(error) => {
            warn!(event = "output.speculation_rules_failed", error = %error);
            Html::default()
        }
    }
}

/// https://schema.org/Person
#[derive(Clone, Serialize)]
pub struct PersonStructuredData {
    #[serde(rename = "@type")]
    pub _type: &'static str,
    pub name: String,
}

/// https://schema.org/WebSite
#[derive(Serialize)]
pub struct WebSiteStructuredData {
    #[serde(rename = "@type")]
    pub _type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub name: String,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inLanguage")]
    pub in_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<PersonStructuredData>,
    #[serde(rename = "copyrightHolder", skip_serializing_if = "Option::is_none")]
    pub copyright_holder: Option<PersonStructuredData>,
    #[serde(rename = "copyrightYear")]
    pub copyright_year: i32,
}

/// https://schema.org/CreativeWork
#[derive(Clone, Serialize)]
pub struct CreativeWorkStructuredData {
    #[serde(rename = "@type")]
    pub _type: &'static str,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(rename = "sameAs", skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<PersonStructuredData>,
}

/// https://schema.org/ItemList
#[derive(Serialize)]
pub struct ItemListStructuredData {
    #[serde(rename = "@type")]
    pub _type: &'static str,
    #[serde(rename = "itemListElement")]
    pub item_list_element: Vec<ListItemStructuredData>,
}

#[derive(Serialize)]
pub struct ListItemStructuredData {
    #[serde(rename = "@type")]
    pub _type: &'static str,
    pub position: usize,
    pub item: CreativeWorkStructuredData,
}

fn author(portfolio: &Portfolio) -> Option<PersonStructuredData> {
    portfolio
        .config
        .author
        .clone()
        .map(|name| PersonStructuredData {
            _type: "Person",
            name,
        })
}

pub fn website_structured_data(portfolio: &Portfolio) -> WebSiteStructuredData {
    let config = &portfolio.config;
    WebSiteStructuredData {
        _type: "WebSite",
        url: config.root_url.clone(),
        name: config.title.clone(),
        description: config.description.clone(),
        in_language: config.language.clone(),
        author: author(portfolio),
        copyright_holder: author(portfolio),
        copyright_year: config.copyright_year(),
    }
}

pub fn project_structured_data(
    portfolio: &Portfolio,
    project: &Project,
) -> CreativeWorkStructuredData {
    let root = portfolio.config.root_url.as_deref();
    CreativeWorkStructuredData {
        _type: "CreativeWork",
        name: project.name.clone(),
        description: project.description.clone(),
        url: root.map(|root| {
            format!(
                "{root}{}",
                Route::Project(project.id.clone()).path::<true>()
            )
        }),
        image: project.thumbnail.as_ref().map(|thumbnail| match root {
            Some(root) if thumbnail.starts_with('/') => format!("{root}{thumbnail}"),
            _ => thumbnail.clone(),
        }),
        keywords: project.tech_stack.clone(),
        same_as: project.links().into_iter().map(|link| link.href).collect(),
        creator: author(portfolio),
    }
}

pub fn projects_structured_data(portfolio: &Portfolio) -> ItemListStructuredData {
    ItemListStructuredData {
        _type: "ItemList",
        item_list_element: portfolio
            .catalog
            .iter()
            .enumerate()
            .map(|(i, project)| ListItemStructuredData {
                _type: "ListItem",
                position: i + 1,
                item: project_structured_data(portfolio, project),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{output::render_fragment, portfolio::test_util::portfolio};

    #[test]
    fn test_project_list() {
        let mut portfolio = portfolio();
        portfolio.config.root_url = Some("https://example.com".to_owned());
        let json = serde_json::to_value(projects_structured_data(&portfolio)).unwrap();
        assert_eq!(json["itemListElement"].as_array().unwrap().len(), 2);
        assert_eq!(json["itemListElement"][0]["position"], 1);
        assert_eq!(
            json["itemListElement"][1]["item"]["url"],
            "https://example.com/projects/p2/"
        );
    }

    #[test]
    fn test_script_tag() {
        let html = render_fragment(write_structured_data(website_structured_data(&portfolio())));
        assert!(html.starts_with("<script type=\"application/ld+json\">"), "{html}");
        assert!(html.contains("\"@context\": \"https://schema.org\""));
        assert!(html.contains("\"copyrightYear\": 2025"));
    }
}
