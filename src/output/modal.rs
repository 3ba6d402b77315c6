use crate::{
    modal::{outcome, ModalState, OpenModal, Target, View},
    output::{render_slide, rich_text_html, Route},
    portfolio::{Portfolio, Project},
};
use yew::{classes, html, Html};

/// Position within a slideshow, and links to its neighbours.
#[derive(Clone, Debug, PartialEq)]
pub struct RelativeNavigation {
    pub index: usize,
    pub count: usize,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl RelativeNavigation {
    pub fn new(portfolio: &Portfolio, state: &ModalState) -> Option<Self> {
        let modal = state.open_modal()?;
        if modal.view() != View::Slideshow {
            return None;
        }
        Some(Self {
            index: modal.slide_index(),
            count: modal.slide_count(),
            previous: modal
                .has_previous()
                .then(|| control_href(portfolio, state, Target::PreviousButton)),
            next: modal
                .has_next()
                .then(|| control_href(portfolio, state, Target::NextButton)),
        })
    }
}

/// Link to the page of the state that activating `target` leads to.
pub fn control_href(portfolio: &Portfolio, state: &ModalState, target: Target) -> String {
    let next = outcome(&portfolio.catalog, state, target);
    let href = Route::for_state(&next).path::<true>();
    if next.is_open() {
        href
    } else {
        format!("{href}#projects")
    }
}

/// Nothing when the state has nothing to show.
pub fn render_modal(portfolio: &Portfolio, state: &ModalState) -> Html {
    let Some((project, modal)) = state.visible(&portfolio.catalog) else {
        return Html::default();
    };
    let labels = &portfolio.config.labels;
    let close_href = control_href(portfolio, state, Target::CloseButton);
    let overlay_href = control_href(portfolio, state, Target::Overlay);

    let body = match modal.view() {
        View::Simple => render_simple(portfolio, state, project, modal),
        View::Slideshow => render_slideshow(portfolio, state, project, modal),
    };

    html! {
        <div id="modal_overlay" class="modal_overlay">
            <a
                class="modal_backdrop"
                href={overlay_href}
                aria-hidden="true"
                tabindex="-1"
            ></a>
            <div
                class="modal_content"
                role="dialog"
                aria-modal="true"
                aria-label={project.name.clone()}
            >
                <a class="modal_close_button" href={close_href.clone()}>{labels.close.clone()}</a>
                {body}
            </div>
            {escape_script(&close_href)}
        </div>
    }
}

fn render_simple(
    portfolio: &Portfolio,
    state: &ModalState,
    project: &Project,
    modal: &OpenModal,
) -> Html {
    let labels = &portfolio.config.labels;
    html! {
        <div class="simple_detail_view">
            <h2 class="modal_title">{project.name.clone()}</h2>
            if let Some(thumbnail) = project.thumbnail.clone() {
                <img
                    class="project_detail_image"
                    src={thumbnail}
                    alt={project.name.clone()}
                />
            }
            <p class="project_detail_description">{project.description.clone()}</p>
            if let Some(full_description) = project.full_description() {
                <div class="project_detail_full_description">
                    <h4>{labels.overview.clone()}</h4>
                    {rich_text_html(&full_description, "")}
                </div>
            }
            if modal.can_show_slideshow() {
                <a
                    class="modal_button view_slideshow_button"
                    href={control_href(portfolio, state, Target::SlideshowButton)}
                >{labels.slideshow.clone()}</a>
            }
        </div>
    }
}

fn render_slideshow(
    portfolio: &Portfolio,
    state: &ModalState,
    project: &Project,
    modal: &OpenModal,
) -> Html {
    let labels = &portfolio.config.labels;
    let Some(slide) = modal.current_slide(project) else {
        return Html::default();
    };
    let Some(relative) = RelativeNavigation::new(portfolio, state) else {
        return Html::default();
    };

    html! {
        <div class="slideshow_view">
            <h2 class="modal_title slide_present_title">
                {format!("{} - {}", project.name, labels.presentation)}
            </h2>
            <div class="project_slide_viewer">
                {render_slide(project, slide)}
            </div>
            <nav class="slide_navigation">
                <a
                    href={relative.previous.clone()}
                    class={classes!(
                        "slide_nav_button",
                        relative.previous.is_none().then_some("slide_nav_unavailable"),
                    )}
                    aria-disabled={relative.previous.is_none().then_some("true")}
                >{labels.previous.clone()}</a>
                <span class="slide_position">
                    {format!("{} / {}", relative.index + 1, relative.count)}
                </span>
                <a
                    href={relative.next.clone()}
                    class={classes!(
                        "slide_nav_button",
                        relative.next.is_none().then_some("slide_nav_unavailable"),
                    )}
                    aria-disabled={relative.next.is_none().then_some("true")}
                >{labels.next.clone()}</a>
            </nav>
            <a
                class="modal_button modal_back_button"
                href={control_href(portfolio, state, Target::BackButton)}
            >{labels.back.clone()}</a>
        </div>
    }
}

/// Pages are static, so the listener goes away with the page.
fn escape_script(close_href: &str) -> Html {
    let close_href = serde_json::to_string(close_href).unwrap_or_else(|_| "\"/\"".to_owned());
    Html::from_html_unchecked(
        format!(
            r#"
        <script>
            document.addEventListener("keydown", (event) => {{
                if (event.key === "Escape" || event.key === "Esc") {{
                    window.location.href = {close_href};
                }}
            }});
        </script>
    "#
        )
        .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{output::render_fragment, portfolio::test_util::portfolio};

    fn render(state: &ModalState) -> String {
        render_fragment(render_modal(&portfolio(), state))
    }

    #[test]
    fn test_closed_renders_nothing() {
        assert_eq!(render(&ModalState::Closed).trim(), "");
        let portfolio = portfolio();
        let unknown = ModalState::open(&portfolio.catalog, &"missing".into());
        assert_eq!(render(&unknown).trim(), "");
    }

    #[test]
    fn test_simple_view_controls() {
        let portfolio = portfolio();
        let html = render(&ModalState::open(&portfolio.catalog, &"p1".into()));
        assert!(html.contains("modal_close_button"), "{html}");
        assert!(html.contains("modal_backdrop"), "{html}");
        assert_eq!(html.matches("href=\"/#projects\"").count(), 2, "{html}");
        assert!(html.contains("href=\"/projects/p1/slides/1/\""), "{html}");
        assert!(html.contains("\"Escape\""));

        let html = render(&ModalState::open(&portfolio.catalog, &"p2".into()));
        assert!(!html.contains("view_slideshow_button"), "{html}");
    }

    #[test]
    fn test_slideshow_view_controls() {
        let portfolio = portfolio();
        let first = ModalState::open(&portfolio.catalog, &"p1".into()).show_slideshow();
        let html = render(&first);
        assert!(html.contains("1 / 3"), "{html}");
        assert!(html.contains("slide_nav_unavailable"));
        assert!(html.contains("href=\"/projects/p1/slides/2/\""));
        assert!(html.contains("href=\"/projects/p1/\""), "back link: {html}");

        let second = first.next_slide();
        let html = render(&second);
        assert!(html.contains("2 / 3"));
        assert!(!html.contains("slide_nav_unavailable"));
        assert!(html.contains("href=\"/projects/p1/slides/2/overview/\""), "{html}");

        let last = second.next_slide();
        let navigation = RelativeNavigation::new(&portfolio, &last).unwrap();
        assert_eq!(navigation.index, 2);
        assert_eq!(navigation.count, 3);
        assert_eq!(navigation.previous.as_deref(), Some("/projects/p1/slides/2/"));
        assert_eq!(navigation.next, None);
    }
}
