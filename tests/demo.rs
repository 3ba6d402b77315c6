use showcase::{
    modal::{reachable_states, ModalState, Session, Target, UiEvent, View},
    output::{self, Route},
    portfolio::{Portfolio, ProjectId},
};
use std::{path::Path, time::Instant};

fn demo() -> Portfolio {
    Portfolio::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("demo/showcase.toml")).unwrap()
}

fn page(portfolio: &Portfolio, path: &str) -> String {
    let output = portfolio.output().unwrap();
    String::from_utf8(output[path].to_vec()).unwrap()
}

#[test]
fn demo_loads() {
    let portfolio = demo();
    assert_eq!(portfolio.config.title, "Alex Kim");
    assert_eq!(
        portfolio
            .catalog
            .iter()
            .map(|project| project.id.as_str())
            .collect::<Vec<_>>(),
        ["project1", "project2"]
    );
    let project1 = portfolio.catalog.get(&ProjectId::new("project1")).unwrap();
    assert_eq!(project1.slides.len(), 6);
    let project2 = portfolio.catalog.get(&ProjectId::new("project2")).unwrap();
    assert!(project2.slides.is_empty());
    assert_eq!(project2.links()[0].label, "YouTube Channel");
    assert!(portfolio.sections.about.is_some());
    assert_eq!(portfolio.static_files.len(), 5);
}

#[test]
fn demo_has_a_page_per_state() {
    let portfolio = demo();
    let output = portfolio.output().unwrap();
    let states = reachable_states(&portfolio.catalog);

    // Closed, two simple views, six slides and five overviews.
    assert_eq!(states.len(), 1 + 2 + 6 + 5);
    for state in &states {
        assert!(output.contains_key(&Route::for_state(state).path::<false>()));
    }
    assert!(output.contains_key("/img/main.svg"));
    assert!(output.contains_key("/manifest.json"));
}

#[test]
fn demo_pages() {
    let portfolio = demo();

    let index = page(&portfolio, "/index.html");
    assert!(index.contains("href=\"/projects/project1/\""));
    assert!(index.contains("href=\"https://www.youtube.com/@example\""));
    assert!(index.contains("See my projects"));

    let project2 = page(&portfolio, "/projects/project2/index.html");
    assert!(!project2.contains("view_slideshow_button"));
    assert!(project2.contains("href=\"/#projects\""));

    let image_slide = page(&portfolio, "/projects/project1/slides/4/index.html");
    assert!(image_slide.contains("4 / 6"));
    assert!(image_slide.contains("slide_image main-p1"));
    assert!(image_slide.contains("target=\"_blank\""));

    let legacy_image = page(&portfolio, "/projects/project1/slides/5/index.html");
    assert!(legacy_image.contains("src=\"/img/attendance.svg\""));
}

#[test]
fn demo_session_matches_pages() {
    let portfolio = demo();
    let mut session = Session::new(&portfolio.catalog);

    session.dispatch(UiEvent::Click(Target::ProjectCard(ProjectId::new("project1"))));
    session.dispatch(UiEvent::Click(Target::SlideshowButton));
    session.dispatch(UiEvent::Click(Target::NextButton));
    let state = session.state();
    let modal = state.open_modal().unwrap();
    assert_eq!(modal.view(), View::Slideshow);
    assert_eq!(modal.slide_index(), 1);
    assert_eq!(
        Route::for_state(&state).path::<true>(),
        "/projects/project1/slides/2/"
    );

    session.dispatch(UiEvent::Click(Target::Overlay));
    assert_eq!(session.state(), ModalState::Closed);
}

#[test]
fn demo_builds() {
    let portfolio = demo();
    let output = portfolio.output().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let summary = output::build(Instant::now(), dir.path(), &portfolio.root, &output).unwrap();
    assert_eq!(summary.written, output.len());
    assert!(dir.path().join("projects/project2/index.html").is_file());
    assert!(dir.path().join("img/icon.svg").is_file());
}
