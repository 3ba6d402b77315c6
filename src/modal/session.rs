use crate::{
    modal::{Document, Key, KeyListener, ModalAction, ModalState, OpenModal, View},
    portfolio::{Catalog, ProjectId},
};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// An element of the page that pointer events can target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    ProjectCard(ProjectId),
    /// External link inside a project card.
    ProjectLink { project: ProjectId, href: String },
    /// Background of the modal, which contains `ModalContent`.
    Overlay,
    ModalContent,
    CloseButton,
    SlideshowButton,
    BackButton,
    PreviousButton,
    NextButton,
    SlideImage(String),
}

impl Target {
    pub fn parent(&self) -> Option<Target> {
        match self {
            Self::ProjectLink { project, .. } => Some(Self::ProjectCard(project.clone())),
            Self::ProjectCard(_) | Self::Overlay => None,
            Self::ModalContent => Some(Self::Overlay),
            Self::CloseButton
            | Self::SlideshowButton
            | Self::BackButton
            | Self::PreviousButton
            | Self::NextButton
            | Self::SlideImage(_) => Some(Self::ModalContent),
        }
    }

    /// Only exists while the modal is open.
    pub fn in_modal(&self) -> bool {
        !matches!(self, Self::ProjectCard(_) | Self::ProjectLink { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Click(Target),
    KeyDown(Key),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    StateChanged,
    /// Opens a URL in a new browsing context, leaving the page untouched.
    OpenInNewContext(String),
}

/// Page shell runtime: the modal, its global key listener, and event dispatch.
///
/// Events are processed one at a time to completion.
#[derive(Debug)]
pub struct Session<'a> {
    catalog: &'a Catalog,
    document: Document,
    open: Option<OpenSession>,
}

/// The escape listener lives exactly as long as the modal is open.
#[derive(Debug)]
struct OpenSession {
    modal: OpenModal,
    _escape: KeyListener,
}

enum Propagation {
    Continue,
    Stop,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            document: Document::new(),
            open: None,
        }
    }

    pub fn with_state(catalog: &'a Catalog, state: ModalState) -> Self {
        let mut session = Self::new(catalog);
        session.enter(state, true);
        session
    }

    pub fn state(&self) -> ModalState {
        self.open
            .as_ref()
            .map(|open| ModalState::Open(open.modal.clone()))
            .unwrap_or_default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Vec<Effect> {
        let before = self.state();
        let mut effects = Vec::new();

        match event {
            UiEvent::Click(target) => {
                if target.in_modal() && self.open.is_none() {
                    return effects;
                }
                let mut current = Some(target.clone());
                while let Some(current_target) = current {
                    let propagation = self.handle_click(&target, &current_target, &mut effects);
                    if matches!(propagation, Propagation::Stop) {
                        break;
                    }
                    current = current_target.parent();
                }
            }
            UiEvent::KeyDown(key) => {
                for action in self.document.key_down(&key) {
                    self.apply(action);
                }
            }
        }

        let after = self.state();
        if after != before {
            debug!(event = "modal.transition", from = ?before, to = ?after);
            effects.insert(0, Effect::StateChanged);
        }
        effects
    }

    /// Controls that can be activated in the current state.
    pub fn offered_targets(&self) -> Vec<Target> {
        let Some(open) = &self.open else {
            return self
                .catalog
                .iter()
                .map(|project| Target::ProjectCard(project.id.clone()))
                .collect();
        };
        let modal = &open.modal;
        let mut targets = vec![Target::CloseButton, Target::Overlay];
        if modal.can_show_slideshow() {
            targets.push(Target::SlideshowButton);
        }
        if modal.view() == View::Slideshow {
            targets.push(Target::BackButton);
        }
        if modal.has_previous() {
            targets.push(Target::PreviousButton);
        }
        if modal.has_next() {
            targets.push(Target::NextButton);
        }
        targets
    }

    fn handle_click(
        &mut self,
        target: &Target,
        current_target: &Target,
        effects: &mut Vec<Effect>,
    ) -> Propagation {
        let offered = self.offered_targets().contains(current_target);
        match current_target {
            Target::ProjectCard(id) => self.apply(ModalAction::Open(id.clone())),
            Target::ProjectLink { href, .. } => {
                effects.push(Effect::OpenInNewContext(href.clone()));
                return Propagation::Stop;
            }
            Target::Overlay => {
                if target == current_target {
                    self.apply(ModalAction::Close);
                }
            }
            Target::ModalContent => {}
            Target::CloseButton => self.apply(ModalAction::Close),
            Target::SlideshowButton if offered => self.apply(ModalAction::ShowSlideshow),
            Target::BackButton if offered => self.apply(ModalAction::BackToSimple),
            Target::PreviousButton if offered => self.apply(ModalAction::PrevSlide),
            Target::NextButton if offered => self.apply(ModalAction::NextSlide),
            Target::SlideshowButton
            | Target::BackButton
            | Target::PreviousButton
            | Target::NextButton => {}
            Target::SlideImage(src) => effects.push(Effect::OpenInNewContext(src.clone())),
        }
        Propagation::Continue
    }

    fn apply(&mut self, action: ModalAction) {
        let reopen = matches!(action, ModalAction::Open(_));
        let next = self.state().apply(self.catalog, &action);
        self.enter(next, reopen);
    }

    fn enter(&mut self, state: ModalState, reopen: bool) {
        match state {
            ModalState::Closed => {
                self.open = None;
            }
            ModalState::Open(modal) => {
                if let Some(open) = self
                    .open
                    .as_mut()
                    .filter(|open| !reopen && open.modal.project() == modal.project())
                {
                    open.modal = modal;
                    return;
                }
                // Release the previous listener before acquiring the next one.
                self.open = None;
                let escape = self.document.on_key_down(Key::Escape, ModalAction::Close);
                self.open = Some(OpenSession {
                    modal,
                    _escape: escape,
                });
            }
        }
    }
}

/// The state reached by activating `target` in `state`.
pub fn outcome(catalog: &Catalog, state: &ModalState, target: Target) -> ModalState {
    let mut session = Session::with_state(catalog, state.clone());
    session.dispatch(UiEvent::Click(target));
    session.state()
}

/// Every state reachable from a closed modal through offered controls, closed first.
pub fn reachable_states(catalog: &Catalog) -> Vec<ModalState> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([ModalState::Closed]);
    let mut states = Vec::new();

    while let Some(state) = queue.pop_front() {
        if !seen.insert(state.clone()) {
            continue;
        }
        let session = Session::with_state(catalog, state.clone());
        for target in session.offered_targets() {
            let next = outcome(catalog, &state, target);
            if !seen.contains(&next) {
                queue.push_back(next);
            }
        }
        states.push(state);
    }

    states
}
