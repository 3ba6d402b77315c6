use crate::{
    output::rich_text_html,
    portfolio::{ImageTextSlide, Project, RichText, Slide},
};
use yew::{classes, html, Html};

pub fn render_slide(project: &Project, slide: &Slide) -> Html {
    let class = classes!("slide", format!("slide_{}", slide.kind()));
    match slide {
        Slide::Title { title, subtitle } => html! {
            <div {class}>
                <h2 class="slide_main_title">{title.clone()}</h2>
                if let Some(subtitle) = subtitle.clone() {
                    <p class="slide_subtitle">{subtitle}</p>
                }
            </div>
        },
        Slide::Text { title, content } => html! {
            <div {class}>
                <h3 class="slide_title">{title.clone()}</h3>
                {rich_text_html(&RichText::plain_text(content.clone()), "slide_text_line")}
            </div>
        },
        Slide::ImageText(image_text) => html! {
            <div {class}>
                <h3 class="slide_title">{image_text.title.clone()}</h3>
                {render_images(image_text)}
                <div class="slide_text">
                    {rich_text_html(&RichText::html(image_text.content.clone()), "")}
                </div>
            </div>
        },
        Slide::TechStack { title, content } => html! {
            <div {class}>
                <h3 class="slide_title">{title.clone()}</h3>
                <div class="slide_tech_list">
                    {project.tech_stack.iter().map(|tech| html!{
                        <span class="tech_tag">{tech.clone()}</span>
                    }).collect::<Html>()}
                </div>
                <p class="slide_text">{content.clone()}</p>
            </div>
        },
        Slide::Links { title, content } => html! {
            <div {class}>
                <h3 class="slide_title">{title.clone()}</h3>
                <p class="slide_text">{content.clone()}</p>
                <div class="project_detail_links">
                    {project.links().into_iter().map(|link| html!{
                        <a
                            class="modal_link"
                            href={link.href}
                            target="_blank"
                            rel="noopener noreferrer"
                        >{link.label}</a>
                    }).collect::<Html>()}
                </div>
            </div>
        },
    }
}

/// Each image links to its full-size version in a new tab.
fn render_images(slide: &ImageTextSlide) -> Html {
    if slide.images.is_empty() {
        return Html::default();
    }
    let single = slide.images.len() == 1;
    html! {
        <div class="multi_image_container">
            {slide.images.iter().enumerate().map(|(index, src)| {
                let alt = if single {
                    slide.title.clone()
                } else {
                    format!("{}-{index}", slide.title)
                };
                html! {
                    <a
                        class="slide_image_link"
                        href={src.clone()}
                        target="_blank"
                        rel="noopener noreferrer"
                    >
                        <img
                            class={classes!("slide_image", slide.image_class.clone())}
                            src={src.clone()}
                            {alt}
                        />
                    </a>
                }
            }).collect::<Html>()}
        </div>
    }
}
