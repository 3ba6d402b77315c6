use crate::portfolio::{Catalog, Project, ProjectId, Slide};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Simple,
    Slideshow,
}

/// The project detail modal. There is no way to be open without a project.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModalState {
    #[default]
    Closed,
    Open(OpenModal),
}

/// `slide_index < slide_count` whenever `slide_count > 0`, and the view is
/// only ever `Slideshow` when there are slides.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpenModal {
    project: ProjectId,
    view: View,
    slide_index: usize,
    slide_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalAction {
    Open(ProjectId),
    ShowSlideshow,
    BackToSimple,
    NextSlide,
    PrevSlide,
    Close,
}

impl OpenModal {
    pub fn project(&self) -> &ProjectId {
        &self.project
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn slide_index(&self) -> usize {
        self.slide_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Whether the control entering the slideshow is offered.
    pub fn can_show_slideshow(&self) -> bool {
        self.view == View::Simple && self.slide_count > 0
    }

    pub fn has_previous(&self) -> bool {
        self.view == View::Slideshow && self.slide_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.view == View::Slideshow && self.slide_index + 1 < self.slide_count
    }

    /// `None` outside the slideshow, or if the project has no such slide.
    pub fn current_slide<'a>(&self, project: &'a Project) -> Option<&'a Slide> {
        if self.view != View::Slideshow {
            return None;
        }
        project.slide(self.slide_index)
    }
}

impl ModalState {
    /// Unknown projects leave the modal closed.
    pub fn open(catalog: &Catalog, id: &ProjectId) -> Self {
        match catalog.get(id) {
            Some(project) => Self::Open(OpenModal {
                project: project.id.clone(),
                view: View::Simple,
                slide_index: 0,
                slide_count: project.slides.len(),
            }),
            None => Self::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn open_modal(&self) -> Option<&OpenModal> {
        match self {
            Self::Open(modal) => Some(modal),
            Self::Closed => None,
        }
    }

    pub fn apply(&self, catalog: &Catalog, action: &ModalAction) -> Self {
        match action {
            ModalAction::Open(id) => Self::open(catalog, id),
            ModalAction::Close => Self::Closed,
            action => match self {
                Self::Closed => Self::Closed,
                Self::Open(modal) => Self::Open(modal.navigate(action)),
            },
        }
    }

    pub fn show_slideshow(&self) -> Self {
        self.map_open(ModalAction::ShowSlideshow)
    }

    pub fn back_to_simple(&self) -> Self {
        self.map_open(ModalAction::BackToSimple)
    }

    pub fn next_slide(&self) -> Self {
        self.map_open(ModalAction::NextSlide)
    }

    pub fn prev_slide(&self) -> Self {
        self.map_open(ModalAction::PrevSlide)
    }

    pub fn close(&self) -> Self {
        Self::Closed
    }

    fn map_open(&self, action: ModalAction) -> Self {
        match self {
            Self::Closed => Self::Closed,
            Self::Open(modal) => Self::Open(modal.navigate(&action)),
        }
    }

    /// What is actually displayed: the project and its modal, or nothing.
    ///
    /// A slideshow without a slide to show renders like a closed modal.
    pub fn visible<'a>(&self, catalog: &'a Catalog) -> Option<(&'a Project, &OpenModal)> {
        let modal = self.open_modal()?;
        let project = catalog.get(&modal.project)?;
        if modal.view == View::Slideshow && modal.current_slide(project).is_none() {
            return None;
        }
        Some((project, modal))
    }
}

impl OpenModal {
    fn navigate(&self, action: &ModalAction) -> Self {
        let mut next = self.clone();
        match action {
            ModalAction::ShowSlideshow => {
                if self.can_show_slideshow() {
                    next.view = View::Slideshow;
                }
            }
            ModalAction::BackToSimple => {
                next.view = View::Simple;
            }
            ModalAction::NextSlide => {
                if self.view == View::Slideshow {
                    next.slide_index = (self.slide_index + 1).min(self.slide_count.saturating_sub(1));
                }
            }
            ModalAction::PrevSlide => {
                if self.view == View::Slideshow {
                    next.slide_index = self.slide_index.saturating_sub(1);
                }
            }
            ModalAction::Open(_) | ModalAction::Close => {}
        }
        next
    }
}
