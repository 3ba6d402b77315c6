use crate::{
    portfolio::{Project, ProjectId},
    Error, Result,
};
use std::collections::HashSet;

/// Read-only, ordered list of projects. Built once at startup.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        let mut seen = HashSet::new();
        for project in &projects {
            if !project.id.is_valid() {
                return Err(Error::InvalidProjectId {
                    id: project.id.to_string(),
                });
            }
            if !seen.insert(&project.id) {
                return Err(Error::DuplicateProject {
                    id: project.id.to_string(),
                });
            }
        }
        Ok(Self { projects })
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> + '_ {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
