pub type ProjectId = String;
pub type GroupId = String;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub title: String,
    pub group: GroupId,
    pub icon: Option<String>,
    pub archived: bool,
    pub is_private: bool,
    pub modified: Option<String>,
    pub tasks_count: u32,
    pub discussions_count: u32,
}

impl ProjectRecord {
    pub fn route(&self) -> String {
        project_route(&self.group, &self.id)
    }
}

pub fn project_route(group: &str, project: &str) -> String {
    format!("/g/{group}/projects/{project}")
}

/// Session-local list of projects, ordered by title.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectCache {
    projects: Vec<ProjectRecord>,
}

impl ProjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list, sorting by title (then id for ties).
    pub fn from_records(mut projects: Vec<ProjectRecord>) -> Self {
        projects.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        Self { projects }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.projects.iter()
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Removes the project with `id`, returning it if it was cached.
    pub fn remove(&mut self, id: &str) -> Option<ProjectRecord> {
        let index = self.projects.iter().position(|project| project.id == id)?;
        Some(self.projects.remove(index))
    }

    pub fn active(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.projects.iter().filter(|project| !project.archived)
    }

    pub fn archived(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.projects.iter().filter(|project| project.archived)
    }

    pub fn for_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a ProjectRecord> {
        self.active().filter(move |project| project.group == group)
    }

    pub fn archived_for_group<'a>(
        &'a self,
        group: &'a str,
    ) -> impl Iterator<Item = &'a ProjectRecord> {
        self.archived().filter(move |project| project.group == group)
    }
}
