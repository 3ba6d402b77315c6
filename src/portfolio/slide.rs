use serde::Deserialize;

/// One page of a project presentation, selected by its `type` key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Slide {
    Title {
        title: String,
        #[serde(default)]
        subtitle: Option<String>,
    },
    /// Line breaks in `content` separate paragraphs.
    Text {
        title: String,
        #[serde(default)]
        content: String,
    },
    ImageText(ImageTextSlide),
    /// Lists the tech stack of the owning project.
    TechStack {
        title: String,
        #[serde(default)]
        content: String,
    },
    /// Lists the external links of the owning project.
    Links {
        title: String,
        #[serde(default)]
        content: String,
    },
}

impl Slide {
    pub fn title(&self) -> &str {
        match self {
            Self::Title { title, .. }
            | Self::Text { title, .. }
            | Self::TechStack { title, .. }
            | Self::Links { title, .. } => title,
            Self::ImageText(slide) => &slide.title,
        }
    }

    /// Used as a CSS class suffix.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::Text { .. } => "text",
            Self::ImageText(_) => "image_text",
            Self::TechStack { .. } => "tech_stack",
            Self::Links { .. } => "links",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawImageTextSlide")]
pub struct ImageTextSlide {
    pub title: String,
    /// Trusted HTML.
    pub content: String,
    /// May be empty, in which case no image block is shown.
    pub images: Vec<String>,
    pub image_class: Option<String>,
}

/// Older portfolio files use a single `image` instead of `images`.
#[derive(Deserialize)]
struct RawImageTextSlide {
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default, alias = "imageClassName")]
    image_class: Option<String>,
}

impl From<RawImageTextSlide> for ImageTextSlide {
    fn from(raw: RawImageTextSlide) -> Self {
        let images = if raw.images.is_empty() {
            raw.image.into_iter().collect()
        } else {
            raw.images
        };
        Self {
            title: raw.title,
            content: raw.content,
            images,
            image_class: raw.image_class.filter(|class| !class.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Slides {
        slides: Vec<Slide>,
    }

    fn parse(text: &str) -> Vec<Slide> {
        toml::from_str::<Slides>(text).unwrap().slides
    }

    #[test]
    fn test_every_variant_parses() {
        let slides = parse(
            r#"
            [[slides]]
            type = "title"
            title = "Albatoon"
            subtitle = "A practical part-time work platform"

            [[slides]]
            type = "text"
            title = "1. Overview"
            content = "first\nsecond"

            [[slides]]
            type = "image_text"
            title = "3. Main screen"
            content = "<span class=\"highlight\">main</span>"
            images = ["/main.png", "/main-bottom.png"]
            image_class = "main-p1"

            [[slides]]
            type = "tech_stack"
            title = "2. Tech stack"
            content = "Why these tools."

            [[slides]]
            type = "links"
            title = "Links"
            content = "Source code."
            "#,
        );

        assert_eq!(
            slides.iter().map(Slide::kind).collect::<Vec<_>>(),
            ["title", "text", "image_text", "tech_stack", "links"]
        );
        assert_eq!(slides[1].title(), "1. Overview");
        let Slide::ImageText(image_text) = &slides[2] else {
            panic!("expected image_text, got {:?}", slides[2]);
        };
        assert_eq!(image_text.images, ["/main.png", "/main-bottom.png"]);
        assert_eq!(image_text.image_class.as_deref(), Some("main-p1"));
    }

    #[test]
    fn test_single_image_is_normalized() {
        let slides = parse(
            r#"
            [[slides]]
            type = "image_text"
            title = "Architecture"
            image = "/architecture.jpg"
            imageClassName = ""
            "#,
        );
        let Slide::ImageText(slide) = &slides[0] else {
            panic!("expected image_text");
        };
        assert_eq!(slide.images, ["/architecture.jpg"]);
        assert_eq!(slide.image_class, None);
        assert_eq!(slide.content, "");
    }

    #[test]
    fn test_images_take_precedence_over_image() {
        let slides = parse(
            r#"
            [[slides]]
            type = "image_text"
            title = "Both"
            image = "/ignored.png"
            images = ["/a.png"]
            "#,
        );
        let Slide::ImageText(slide) = &slides[0] else {
            panic!("expected image_text");
        };
        assert_eq!(slide.images, ["/a.png"]);
    }

    #[test]
    fn test_image_text_without_images() {
        let slides = parse(
            r#"
            [[slides]]
            type = "image_text"
            title = "Nothing to show"
            content = "text only"
            "#,
        );
        let Slide::ImageText(slide) = &slides[0] else {
            panic!("expected image_text");
        };
        assert!(slide.images.is_empty());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = toml::from_str::<Slides>(
            r#"
            [[slides]]
            type = "video"
            title = "Demo"
            "#,
        );
        assert!(result.is_err());
    }
}
