use crate::{
    modal::{ModalState, Target},
    output::{
        control_href, rich_text_html, website_structured_data, write_speculation_rules,
        write_structured_data, RelativeNavigation,
    },
    portfolio::{About, Contact, Hero, Portfolio, Review, RichText},
    util::join,
};
use tracing::warn;
use yew::{classes, function_component, html, AttrValue, Html, LocalServerRenderer, Properties};

pub struct AppProps<'a> {
    pub portfolio: &'a Portfolio,
    pub canonical: String,
    pub title: AttrValue,
    pub description: Option<AttrValue>,
    pub og_image: Option<String>,
    pub head: Html,
    /// Rendered over the page, or empty.
    pub modal: Html,
    pub relative: Option<RelativeNavigation>,
    pub index: bool,
}

pub fn app(props: AppProps<'_>) -> Html {
    let style = Html::from_html_unchecked(
        r#"
        :root {
            --accent: #3b5bdb;
            --accent-soft: #e7ecff;
            --text: #1f2430;
            --muted: #5c6270;
        }

        html {
            font-size: calc(12px + 0.35vw);
            scroll-behavior: smooth;
        }

        body {
            margin: 0;
            color: var(--text);
            background-color: #f7f8fb;
            font-family: "Pretendard", "Helvetica Neue", Arial, sans-serif;
            line-height: 1.6;
        }

        body.modal_open {
            overflow: hidden;
        }

        a {
            color: var(--accent);
            text-decoration: none;
        }

        p a, li a, footer a {
            text-decoration: underline;
        }

        #header {
            position: sticky;
            top: 0;
            z-index: 10;
            display: flex;
            flex-direction: row;
            align-items: center;
            gap: 1rem;
            padding: 1rem 2rem;
            background-color: white;
            box-shadow: 0 0.1rem 0.5rem rgba(0, 0, 0, 0.06);
        }

        #title {
            flex-grow: 1;
            margin: 0;
            font-size: 1.25rem;
        }

        #navigation {
            display: flex;
            flex-direction: row;
            gap: 1.25rem;
        }

        .section {
            max-width: 64rem;
            margin: 0 auto;
            padding: 4rem 2rem;
        }

        .section_title {
            margin-top: 0;
            font-size: 1.75rem;
        }

        .hero {
            text-align: center;
            padding: 6rem 2rem;
        }

        .hero_headline {
            font-size: 2.25rem;
            margin: 0.5rem 0;
        }

        .hero_tagline, .hero_greeting {
            color: var(--muted);
        }

        .hero_call_to_action, .modal_button {
            display: inline-block;
            padding: 0.6rem 1.4rem;
            border-radius: 2rem;
            background-color: var(--accent);
            color: white;
        }

        .hero_links {
            display: flex;
            justify-content: center;
            gap: 1rem;
            margin-top: 1.5rem;
        }

        .highlight, [class^="highlight_"] {
            color: var(--accent);
            font-weight: bold;
        }

        .about_intro {
            display: flex;
            flex-direction: row;
            gap: 2rem;
            align-items: flex-start;
        }

        .about_portrait {
            width: 12rem;
            border-radius: 1rem;
        }

        .about_facts dt {
            font-weight: bold;
        }

        .about_facts dd {
            margin: 0 0 0.5rem 0;
        }

        .skill_categories {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(14rem, 1fr));
            gap: 1rem;
        }

        .skill_tag, .tech_tag {
            display: inline-block;
            margin: 0.15rem;
            padding: 0.1rem 0.6rem;
            border-radius: 1rem;
            background-color: var(--accent-soft);
            font-size: 0.85rem;
        }

        .project_grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr));
            gap: 1.5rem;
        }

        .project_card {
            display: flex;
            flex-direction: column;
            overflow: hidden;
            border-radius: 0.75rem;
            background-color: white;
            box-shadow: 0 0.2rem 1rem rgba(0, 0, 0, 0.08);
        }

        .project_card_link {
            color: inherit;
            flex-grow: 1;
        }

        .project_card_image {
            width: 100%;
            aspect-ratio: 16 / 9;
            object-fit: cover;
        }

        .project_card_title, .project_card_description, .project_card_tech {
            margin: 0.75rem 1rem;
        }

        .project_card_links {
            display: flex;
            gap: 1rem;
            padding: 0.75rem 1rem;
            border-top: 1px solid #eef0f4;
        }

        .contact_entries {
            list-style: none;
            padding: 0;
        }

        #footer {
            text-align: center;
            padding: 2rem;
            color: var(--muted);
        }

        .modal_overlay {
            position: fixed;
            inset: 0;
            z-index: 100;
            display: flex;
            align-items: center;
            justify-content: center;
        }

        .modal_backdrop {
            position: absolute;
            inset: 0;
            background-color: rgba(0, 0, 0, 0.6);
        }

        .modal_content {
            position: relative;
            width: min(56rem, 92vw);
            max-height: 90vh;
            overflow-y: auto;
            padding: 2rem;
            border-radius: 1rem;
            background-color: white;
        }

        .modal_close_button {
            position: absolute;
            top: 1rem;
            right: 1.25rem;
        }

        .project_detail_image, .slide_image {
            max-width: 100%;
            border-radius: 0.5rem;
        }

        .multi_image_container {
            display: flex;
            flex-wrap: wrap;
            gap: 0.5rem;
        }

        .slide {
            min-height: 20rem;
        }

        .slide_title {
            text-align: center;
        }

        .slide_main_title {
            margin-top: 6rem;
            text-align: center;
            font-size: 2.5rem;
        }

        .slide_subtitle {
            text-align: center;
            color: var(--muted);
        }

        .slide_navigation {
            display: flex;
            flex-direction: row;
            justify-content: space-between;
            align-items: center;
            margin: 1.5rem 0;
        }

        .slide_nav_unavailable {
            opacity: 0.4;
            pointer-events: none;
        }

        @media (max-width: 600px) {
            #navigation {
                display: none;
            }

            .about_intro {
                flex-direction: column;
            }
        }
    "#
        .into(),
    );

    let portfolio = props.portfolio;
    let config = &portfolio.config;
    let labels = &config.labels;
    let modal_open = props.modal != Html::default();

    let mut robots_meta = if props.index {
        "index,follow"
    } else {
        "noindex,follow"
    };
    if modal_open && !props.index {
        robots_meta = "noindex,nofollow";
    }

    let copyright = format!(
        "© {} {}",
        config.copyright_year(),
        config.author.as_deref().unwrap_or(&config.title)
    );

    html! {
        <html lang={config.language.clone()}>
            <head>
                <meta charset="UTF-8"/>
                <title>{props.title.clone()}</title>
                <meta property="og:title" content={props.title.clone()}/>
                <meta property="og:site_name" content={config.title.clone()}/>
                if let Some(description) = props.description.clone() {
                    <meta name="description" content={description.clone()}/>
                    <meta property="og:description" content={description}/>
                }
                if !config.keywords.is_empty() {
                    <meta name="keywords" content={config.keywords.join(",")}/>
                }
                if let Some(author) = config.author.clone() {
                    <meta name="author" content={author}/>
                }
                <meta name="generator" content="showcase"/>
                if let Some(icon) = config.icon.clone() {
                    <link rel="icon" href={icon}/>
                }
                <meta name="robots" content={robots_meta}/>
                <link rel="manifest" href="/manifest.json"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta property="og:type" content="website"/>
                if let Some(root) = &config.root_url {
                    <link rel="canonical" href={format!("{root}{}", props.canonical)}/>
                    <meta property="og:url" content={format!("{root}{}", props.canonical)}/>
                    if let Some(og_image) = &props.og_image {
                        <meta property="og:image" content={format!("{root}{og_image}")}/>
                    }
                }
                if let Some(relative) = &props.relative {
                    if let Some(previous) = &relative.previous {
                        <link rel="prev" href={previous.clone()}/>
                    }
                    if let Some(next) = &relative.next {
                        <link rel="next" href={next.clone()}/>
                    }
                }
                {write_speculation_rules(
                    props
                        .relative
                        .as_ref()
                        .map(|relative| {
                            relative
                                .previous
                                .clone()
                                .into_iter()
                                .chain(relative.next.clone())
                                .collect()
                        })
                        .unwrap_or_default()
                )}
                {write_structured_data(website_structured_data(portfolio))}
                {props.head.clone()}
                <style>{style}</style>
            </head>
            <body class={classes!(modal_open.then_some("modal_open"))}>
                <header id="header">
                    <h1 id="title">
                        <a href="/">{config.title.clone()}</a>
                    </h1>
                    <nav id="navigation">
                        <a href="/#home">{labels.home.clone()}</a>
                        if portfolio.sections.about.is_some() {
                            <a href="/#about">{labels.about.clone()}</a>
                        }
                        <a href="/#projects">{labels.projects.clone()}</a>
                        if portfolio.sections.contact.is_some() {
                            <a href="/#contact">{labels.contact.clone()}</a>
                        }
                    </nav>
                </header>
                <main id="main">
                    if let Some(hero) = &portfolio.sections.hero {
                        {render_hero(hero)}
                    }
                    if let Some(about) = &portfolio.sections.about {
                        {render_about(about)}
                    }
                    {render_projects(portfolio)}
                    if let Some(review) = &portfolio.sections.review {
                        {render_review(review)}
                    }
                    if let Some(contact) = &portfolio.sections.contact {
                        {render_contact(contact)}
                    }
                </main>
                <footer id="footer">
                    {join(&[
                        html!{{copyright}},
                        html!{{"Made with showcase"}},
                    ], &html!{{" | "}})}
                </footer>
                {props.modal.clone()}
            </body>
        </html>
    }
}

fn render_hero(hero: &Hero) -> Html {
    html! {
        <section id="home" class="hero">
            if let Some(greeting) = hero.greeting.clone() {
                <p class="hero_greeting">{greeting}</p>
            }
            <h2 class="hero_headline">
                {rich_text_html(&RichText::html(hero.headline.clone()), "")}
            </h2>
            if let Some(tagline) = hero.tagline.clone() {
                <p class="hero_tagline">{tagline}</p>
            }
            if let Some(call_to_action) = hero.call_to_action.clone() {
                <a class="hero_call_to_action" href="#projects">{call_to_action}</a>
            }
            if !hero.links.is_empty() {
                <div class="hero_links">
                    {hero.links.iter().map(|link| html!{
                        <a
                            href={link.href.clone()}
                            target="_blank"
                            rel="noopener noreferrer"
                        >{link.label.clone()}</a>
                    }).collect::<Html>()}
                </div>
            }
        </section>
    }
}

fn render_about(about: &About) -> Html {
    html! {
        <section id="about" class="section">
            <h2 class="section_title">{about.heading.clone()}</h2>
            <div class="about_intro">
                if let Some(portrait) = about.portrait.clone() {
                    <img class="about_portrait" src={portrait} alt={about.heading.clone()}/>
                }
                <div class="about_text">
                    if let Some(intro_heading) = about.intro_heading.clone() {
                        <h3>{intro_heading}</h3>
                    }
                    {about.paragraphs.iter().map(|paragraph| {
                        rich_text_html(&RichText::markdown(paragraph.clone()), "")
                    }).collect::<Html>()}
                </div>
            </div>
            if !about.facts.is_empty() {
                <div class="about_facts">
                    if let Some(facts_heading) = about.facts_heading.clone() {
                        <h3>{facts_heading}</h3>
                    }
                    <dl>
                        {about.facts.iter().map(|fact| html!{<>
                            <dt>{fact.label.clone()}</dt>
                            <dd>{fact.value.clone()}</dd>
                        </>}).collect::<Html>()}
                    </dl>
                </div>
            }
            if !about.skills.is_empty() {
                <div class="skills">
                    if let Some(skills_heading) = about.skills_heading.clone() {
                        <h3>{skills_heading}</h3>
                    }
                    <div class="skill_categories">
                        {about.skills.iter().map(|category| html!{
                            <div class="skill_category">
                                <h4>{category.name.clone()}</h4>
                                {category.skills.iter().map(|skill| html!{
                                    <span class="skill_tag">{skill.clone()}</span>
                                }).collect::<Html>()}
                            </div>
                        }).collect::<Html>()}
                    </div>
                </div>
            }
        </section>
    }
}

/// Each card links to the page of its opened modal; external links sit beside it.
fn render_projects(portfolio: &Portfolio) -> Html {
    html! {
        <section id="projects" class="section">
            <h2 class="section_title">{portfolio.config.labels.projects.clone()}</h2>
            <div class="project_grid">
                {portfolio.catalog.iter().map(|project| {
                    let href = control_href(
                        portfolio,
                        &ModalState::Closed,
                        Target::ProjectCard(project.id.clone()),
                    );
                    let links = project.links();
                    html! {
                        <article class="project_card" id={format!("project_{}", project.id)}>
                            <a class="project_card_link" {href}>
                                if let Some(thumbnail) = project.thumbnail.clone() {
                                    <img
                                        class="project_card_image"
                                        src={thumbnail}
                                        alt={project.name.clone()}
                                        loading="lazy"
                                    />
                                }
                                <h3 class="project_card_title">{project.name.clone()}</h3>
                                <p class="project_card_description">{project.description.clone()}</p>
                                if !project.tech_stack.is_empty() {
                                    <div class="project_card_tech">
                                        {project.tech_stack.iter().map(|tech| html!{
                                            <span class="tech_tag">{tech.clone()}</span>
                                        }).collect::<Html>()}
                                    </div>
                                }
                            </a>
                            if !links.is_empty() {
                                <div class="project_card_links">
                                    {links.into_iter().map(|link| html!{
                                        <a
                                            class="project_card_external"
                                            href={link.href}
                                            target="_blank"
                                            rel="noopener noreferrer"
                                        >{link.label}</a>
                                    }).collect::<Html>()}
                                </div>
                            }
                        </article>
                    }
                }).collect::<Html>()}
            </div>
        </section>
    }
}

fn render_review(review: &Review) -> Html {
    html! {
        <section id="review" class="section">
            <h2 class="section_title">{review.heading.clone()}</h2>
            {review.paragraphs.iter().map(|paragraph| {
                rich_text_html(&RichText::markdown(paragraph.clone()), "")
            }).collect::<Html>()}
        </section>
    }
}

fn render_contact(contact: &Contact) -> Html {
    html! {
        <section id="contact" class="section">
            <h2 class="section_title">{contact.heading.clone()}</h2>
            if let Some(description) = contact.description.clone() {
                <p class="contact_description">{description}</p>
            }
            <ul class="contact_entries">
                {contact.entries.iter().map(|entry| html!{
                    <li class="contact_entry">
                        <strong>{entry.label.clone()}</strong>
                        {" "}
                        if let Some(href) = entry.href.clone() {
                            <a {href}>{entry.value.clone()}</a>
                        } else {
                            {entry.value.clone()}
                        }
                    </li>
                }).collect::<Html>()}
            </ul>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct StaticHtmlProps {
    html: Html,
}

#[function_component(StaticHtml)]
fn static_html(props: &StaticHtmlProps) -> Html {
    props.html.clone()
}

/// Renders markup without hydration markers.
pub fn render_fragment(html: Html) -> String {
    let renderer =
        LocalServerRenderer::<StaticHtml>::with_props(StaticHtmlProps { html }).hydratable(false);
    futures::executor::block_on(renderer.render())
}

pub fn render_html(props: AppProps<'_>) -> Vec<u8> {
    let canonical = props.canonical.clone();
    let html = render_fragment(app(props));

    let mut options = markup_fmt::config::FormatOptions::default();
    options.layout.use_tabs = true;
    options.layout.indent_width = 1;
    let mut html =
        match markup_fmt::format_text(&html, markup_fmt::Language::Html, &options, |code, _| {
            Ok::<_, std::convert::Infallible>(code.into())
        }) {
            Ok(formatted) => formatted,
            Err(error) => {
                warn!(event = "output.format_failed", page = %canonical, error = ?error);
                html
            }
        };

    html.insert_str(0, "<!DOCTYPE html>\n");

    html = html
        .lines()
        .filter(|l| !l.chars().all(|c| c.is_whitespace()))
        .map(|l| format!("{l}\n"))
        .collect();

    html.into_bytes()
}
