use crate::{portfolio::Portfolio, Error, Result};
use serde::Serialize;

pub const MANIFEST_PATH: &str = "/manifest.json";

pub fn write_manifest(portfolio: &Portfolio) -> Result<Vec<u8>> {
    let config = &portfolio.config;
    let manifest = Manifest {
        name: config.title.clone(),
        description: config.description.clone(),
        lang: config.language.clone(),
        display: "standalone",
        categories: config.keywords.clone(),
        start_url: "/",
        handle_links: "not-preferred",
        icons: config
            .icon
            .iter()
            .map(|src| Icon {
                src: src.clone(),
                sizes: "any",
            })
            .collect(),
    };

    serde_json::to_vec(&manifest).map_err(|e| Error::Render {
        path: MANIFEST_PATH.to_owned(),
        message: e.to_string(),
    })
}

#[derive(Serialize)]
struct Manifest {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    lang: String,
    display: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    categories: Vec<String>,
    start_url: &'static str,
    handle_links: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    icons: Vec<Icon>,
}

#[derive(Serialize)]
struct Icon {
    src: String,
    sizes: &'static str,
}
