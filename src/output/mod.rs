use crate::{
    modal::{reachable_states, ModalState, View},
    portfolio::Portfolio,
    Error, Result,
};
use sitemap_rs::{
    url::{ChangeFrequency, Url},
    url_set::UrlSet,
};
use std::{collections::HashMap, sync::LazyLock};
use tracing::debug;
use yew::Html;

mod app;
mod build;
mod modal;
mod pwa;
mod rich_text;
mod route;
mod serve;
mod slide;
mod structured_data;

pub use app::*;
pub use build::*;
pub use modal::*;
pub use pwa::*;
pub use rich_text::*;
pub use route::*;
pub use serve::*;
pub use slide::*;
pub use structured_data::*;

pub type DynLazy<'a, T> = LazyLock<T, Box<dyn FnOnce() -> T + Send + Sync + 'a>>;

/// Public path (with leading slash) to file contents, rendered on first access.
pub type Output<'a> = HashMap<String, DynLazy<'a, Vec<u8>>>;

fn insert<'a>(output: &mut Output<'a>, path: String, file: DynLazy<'a, Vec<u8>>) -> Result<()> {
    if output.contains_key(&path) {
        return Err(Error::Render {
            path,
            message: "more than one file has this path".to_owned(),
        });
    }
    output.insert(path, file);
    Ok(())
}

impl Portfolio {
    pub fn output(&self) -> Result<Output<'_>> {
        let mut ret = Output::new();
        let mut sitemap = Vec::<Url>::new();

        for state in reachable_states(&self.catalog) {
            let route = Route::for_state(&state);
            let path = route.path::<false>();
            debug!(event = "output.page_planned", path = %path);

            if let Some(root_url) = &self.config.root_url {
                if indexable(&route) {
                    sitemap.push(
                        Url::builder(format!("{root_url}{}", route.path::<true>()))
                            .change_frequency(if route == Route::Index {
                                ChangeFrequency::Weekly
                            } else {
                                ChangeFrequency::Monthly
                            })
                            .build()
                            .map_err(|e| Error::Sitemap {
                                message: format!("{e:?}"),
                            })?,
                    );
                }
            }

            insert(
                &mut ret,
                path,
                LazyLock::new(Box::new(move || self.render_page(&state))),
            )?;
        }

        let manifest = write_manifest(self)?;
        insert(
            &mut ret,
            MANIFEST_PATH.to_owned(),
            LazyLock::new(Box::new(move || manifest)),
        )?;

        if let Some(root_url) = &self.config.root_url {
            sitemap.sort_by_key(|url| {
                (
                    url.location.chars().filter(|c| *c == '/').count(),
                    url.location.clone(),
                )
            });
            let sitemap = UrlSet::new(sitemap).map_err(|e| Error::Sitemap {
                message: format!("{e:?}"),
            })?;
            let mut xml = Vec::<u8>::new();
            sitemap.write(&mut xml).map_err(|e| Error::Sitemap {
                message: format!("{e:?}"),
            })?;
            insert(
                &mut ret,
                "/sitemap.xml".to_owned(),
                LazyLock::new(Box::new(move || xml)),
            )?;
            debug!(event = "output.sitemap_planned", root_url = %root_url);
        }

        insert(
            &mut ret,
            "/robots.txt".to_owned(),
            LazyLock::new(Box::new(move || self.robots_txt().into_bytes())),
        )?;

        for file in &self.static_files {
            insert(
                &mut ret,
                file.path.clone(),
                LazyLock::new(Box::new(move || file.contents.clone())),
            )?;
        }

        Ok(ret)
    }

    fn robots_txt(&self) -> String {
        let mut robots_txt = String::from("User-agent: *\nAllow: /\n");
        if let Some(url) = &self.config.root_url {
            robots_txt.push_str(&format!("Sitemap: {url}/sitemap.xml\n"));
        }
        robots_txt
    }

    /// The whole page for one modal state, with the modal (if any) over the page.
    pub fn render_page(&self, state: &ModalState) -> Vec<u8> {
        let config = &self.config;
        let route = Route::for_state(state);
        let relative = RelativeNavigation::new(self, state);

        let Some((project, modal)) = state.visible(&self.catalog) else {
            return render_html(AppProps {
                portfolio: self,
                canonical: Route::Index.path::<true>(),
                title: config.title.clone().into(),
                description: config.description.clone().map(|d| d.into()),
                og_image: config.icon.clone(),
                head: write_structured_data(projects_structured_data(self)),
                modal: Html::default(),
                relative: None,
                index: true,
            });
        };

        let title = match modal.view() {
            View::Simple => format!("{} | {}", project.name, config.title),
            View::Slideshow => format!(
                "{} ({}/{}) | {}",
                project.name,
                modal.slide_index() + 1,
                modal.slide_count(),
                config.title
            ),
        };

        render_html(AppProps {
            portfolio: self,
            canonical: route.path::<true>(),
            title: title.into(),
            description: Some(project.description.clone().into()),
            og_image: project.thumbnail.clone().or_else(|| config.icon.clone()),
            head: write_structured_data(project_structured_data(self, project)),
            modal: render_modal(self, state),
            relative,
            index: indexable(&route),
        })
    }
}

/// Overview pages repeat the project page, so they stay out of search results.
fn indexable(route: &Route) -> bool {
    !matches!(route, Route::Overview(..))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{test_util::portfolio, StaticFile};

    fn page(output: &Output<'_>, path: &str) -> String {
        String::from_utf8(output[path].to_vec()).unwrap()
    }

    #[test]
    fn test_one_page_per_state() {
        let portfolio = portfolio();
        let output = portfolio.output().unwrap();
        let states = reachable_states(&portfolio.catalog);
        assert_eq!(output.len(), states.len() + 2);
        for state in &states {
            assert!(output.contains_key(&Route::for_state(state).path::<false>()));
        }
        assert!(output.contains_key("/manifest.json"));
        assert!(output.contains_key("/robots.txt"));
        assert!(!output.contains_key("/sitemap.xml"));
    }

    #[test]
    fn test_pages() {
        let portfolio = portfolio();
        let output = portfolio.output().unwrap();

        let index = page(&output, "/index.html");
        assert!(!index.contains("id=\"modal_overlay\""));
        assert!(index.contains("\"ItemList\""));

        let p1 = page(&output, "/projects/p1/index.html");
        assert!(p1.contains("id=\"modal_overlay\""));
        assert!(p1.contains("view_slideshow_button"));
        assert!(p1.contains("<title>Project p1 | Test Portfolio</title>"), "{p1}");

        let p2 = page(&output, "/projects/p2/index.html");
        assert!(p2.contains("id=\"modal_overlay\""));
        assert!(!p2.contains("view_slideshow_button"));
        assert!(!output.contains_key("/projects/p2/slides/1/index.html"));

        let slide = page(&output, "/projects/p1/slides/2/index.html");
        assert!(slide.contains("2 / 3"));
        assert!(slide.contains("rel=\"prev\""));
        assert!(slide.contains("rel=\"next\""));
        assert!(slide.contains("Slide 2"));
    }

    #[test]
    fn test_sitemap_with_root_url() {
        let mut portfolio = portfolio();
        portfolio.config.root_url = Some("https://example.com".to_owned());
        let output = portfolio.output().unwrap();

        let sitemap = page(&output, "/sitemap.xml");
        assert!(sitemap.contains("https://example.com/projects/p1/slides/3/"));
        assert!(!sitemap.contains("overview"));

        let robots = page(&output, "/robots.txt");
        assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));

        let overview = page(&output, "/projects/p1/slides/2/overview/index.html");
        assert!(overview.contains("noindex"));
    }

    #[test]
    fn test_static_files() {
        let mut portfolio = portfolio();
        portfolio.static_files.push(StaticFile {
            path: "/img/main.png".to_owned(),
            contents: b"png".to_vec(),
        });
        let output = portfolio.output().unwrap();
        assert_eq!(&**output["/img/main.png"], b"png");
        drop(output);

        portfolio.static_files.push(StaticFile {
            path: "/robots.txt".to_owned(),
            contents: Vec::new(),
        });
        let error = portfolio.output().unwrap_err();
        assert!(matches!(error, Error::Render { .. }), "{error}");
    }
}
