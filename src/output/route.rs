use crate::{
    modal::{ModalState, View},
    portfolio::{Catalog, ProjectId},
};

/// Where each modal state lives in the generated site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Index,
    Project(ProjectId),
    /// Simple view returned to from slide `.1`, which the slideshow resumes at.
    Overview(ProjectId, usize),
    Slide(ProjectId, usize),
}

impl Route {
    pub fn for_state(state: &ModalState) -> Self {
        let Some(modal) = state.open_modal() else {
            return Self::Index;
        };
        let id = modal.project().clone();
        match (modal.view(), modal.slide_index()) {
            (View::Simple, 0) => Self::Project(id),
            (View::Simple, index) => Self::Overview(id, index),
            (View::Slideshow, index) => Self::Slide(id, index),
        }
    }

    /// Replays the controls leading to this route. Unknown projects give a closed modal.
    pub fn to_state(&self, catalog: &Catalog) -> ModalState {
        let (id, index, view) = match self {
            Self::Index => return ModalState::Closed,
            Self::Project(id) => (id, 0, View::Simple),
            Self::Overview(id, index) => (id, *index, View::Simple),
            Self::Slide(id, index) => (id, *index, View::Slideshow),
        };
        let mut state = ModalState::open(catalog, id);
        if index == 0 && view == View::Simple {
            return state;
        }
        state = state.show_slideshow();
        let count = state.open_modal().map_or(0, |modal| modal.slide_count());
        // Past the last slide, navigation clamps, so stop there.
        for _ in 0..index.min(count) {
            state = state.next_slide();
        }
        if view == View::Simple {
            state = state.back_to_simple();
        }
        state
    }

    /// With `PUBLIC`, the link target; otherwise the file in the output manifest.
    pub fn path<const PUBLIC: bool>(&self) -> String {
        let base = match self {
            Self::Index => "/".to_owned(),
            Self::Project(id) => format!("/projects/{id}/"),
            Self::Overview(id, index) => format!("/projects/{id}/slides/{}/overview/", index + 1),
            Self::Slide(id, index) => format!("/projects/{id}/slides/{}/", index + 1),
        };
        if PUBLIC {
            base
        } else {
            format!("{base}index.html")
        }
    }

    /// Accepts both forms produced by [`Route::path`].
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.strip_suffix("index.html").unwrap_or(path);
        let path = path.strip_prefix('/')?;
        let path = path.strip_suffix('/').unwrap_or(path);
        if path.is_empty() {
            return Some(Self::Index);
        }

        let segments = path.split('/').collect::<Vec<_>>();
        let slide_number = |segment: &str| {
            segment
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
        };
        match segments.as_slice() {
            ["projects", id] => Some(Self::Project(ProjectId::new(*id))),
            ["projects", id, "slides", number] => {
                Some(Self::Slide(ProjectId::new(*id), slide_number(number)?))
            }
            ["projects", id, "slides", number, "overview"] => {
                Some(Self::Overview(ProjectId::new(*id), slide_number(number)?))
            }
            _ => None,
        }
    }

    pub fn project(&self) -> Option<&ProjectId> {
        match self {
            Self::Index => None,
            Self::Project(id) | Self::Overview(id, _) | Self::Slide(id, _) => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{modal::reachable_states, portfolio::test_util::catalog};

    #[test]
    fn test_paths() {
        let id = ProjectId::new("p1");
        assert_eq!(Route::Index.path::<true>(), "/");
        assert_eq!(Route::Index.path::<false>(), "/index.html");
        assert_eq!(Route::Project(id.clone()).path::<true>(), "/projects/p1/");
        assert_eq!(
            Route::Slide(id.clone(), 0).path::<false>(),
            "/projects/p1/slides/1/index.html"
        );
        assert_eq!(
            Route::Overview(id, 2).path::<true>(),
            "/projects/p1/slides/3/overview/"
        );
    }

    #[test]
    fn test_every_reachable_state_round_trips() {
        let catalog = catalog();
        for state in reachable_states(&catalog) {
            let route = Route::for_state(&state);
            assert_eq!(route.to_state(&catalog), state, "{route:?}");
            for path in [route.path::<true>(), route.path::<false>()] {
                assert_eq!(Route::parse(&path), Some(route.clone()), "{path}");
            }
        }
    }

    #[test]
    fn test_parse_rejects_other_paths() {
        for path in [
            "",
            "projects",
            "/projects/p1/slides/0/",
            "/projects/p1/slides/x/",
            "/projects/p1/extra/",
            "/robots.txt",
        ] {
            assert_eq!(Route::parse(path), None, "{path}");
        }
    }

    #[test]
    fn test_unknown_project_is_closed() {
        let catalog = catalog();
        let route = Route::parse("/projects/missing/").unwrap();
        assert_eq!(route.to_state(&catalog), ModalState::Closed);
        let route = Route::parse("/projects/missing/slides/2/").unwrap();
        assert_eq!(route.to_state(&catalog), ModalState::Closed);
    }

    #[test]
    fn test_huge_slide_number_clamps() {
        let catalog = catalog();
        let route = Route::parse(&format!("/projects/p1/slides/{}/", usize::MAX)).unwrap();
        assert_eq!(route, Route::Slide(ProjectId::new("p1"), usize::MAX - 1));
        let state = route.to_state(&catalog);
        let modal = state.open_modal().unwrap();
        assert_eq!(modal.view(), View::Slideshow);
        assert_eq!(modal.slide_index(), 2);
        assert_ne!(Route::for_state(&state), route);

        let route = Route::Overview(ProjectId::new("p1"), usize::MAX);
        let state = route.to_state(&catalog);
        assert_eq!(state.open_modal().unwrap().view(), View::Simple);
        assert_eq!(state.open_modal().unwrap().slide_index(), 2);
    }
}
