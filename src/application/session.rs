use crate::application::use_cases::load_dashboard::LoadDashboardUseCaseOutput;
use crate::domain::external_apis::github::FetchOutcome;
use crate::domain::models::activity::Follower;
use crate::domain::models::profile::Profile;
use crate::domain::models::repository::Repository;
use crate::domain::services::analytics::Analytics;
use crate::domain::services::listing::{FilterKey, ListView};
use crate::domain::services::metrics::StatsSummary;
use crate::domain::services::streak::Streak;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Repositories,
    Analytics,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Repositories => "repositories",
            Tab::Analytics => "analytics",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Modal {
    Repository,
    Followers,
}

/// UI events sent by the page.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    SelectTab { tab: Tab },
    ApplyFilter { filter: FilterKey },
    SearchInput { term: String },
    LoadMore,
    OpenRepository { position: usize },
    OpenFollowers,
    CloseModal { modal: Modal },
}

/// A change the page has to render.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    Profile(Profile),
    Stats(StatsSummary),
    Streak(Streak),
    Analytics(Analytics),
    /// Cards for `repositories`, the first of which sits at `first_position`
    /// of the filtered view. `append` adds them below the existing cards.
    Grid {
        repositories: Vec<Repository>,
        first_position: usize,
        append: bool,
    },
    /// The account has no repositories (or they failed to load).
    EmptyGrid,
    LoadMore {
        remaining: usize,
    },
    TabSelected(Tab),
    FilterSelected(FilterKey),
    RepositoryDetail(Repository),
    FollowersLoading,
    Followers(FetchOutcome<Vec<Follower>>),
    ModalClosed(Modal),
}

/// Interaction state of one open page.
#[derive(Debug)]
pub struct DashboardSession {
    profile: Profile,
    stats: StatsSummary,
    analytics: Analytics,
    list: ListView,
    tab: Tab,
    open_modal: Option<Modal>,
}

impl DashboardSession {
    pub fn new(dashboard: LoadDashboardUseCaseOutput) -> Self {
        Self {
            profile: dashboard.profile.into_value(),
            stats: dashboard.stats,
            analytics: dashboard.analytics,
            list: ListView::new(dashboard.repositories.into_value()),
            tab: Tab::default(),
            open_modal: None,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn open_modal(&self) -> Option<Modal> {
        self.open_modal
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    /// Full first render.
    pub fn initial_updates(&self) -> Vec<ViewUpdate> {
        let mut updates = vec![
            ViewUpdate::Profile(self.profile.clone()),
            ViewUpdate::Stats(self.stats.clone()),
            ViewUpdate::TabSelected(self.tab),
            ViewUpdate::FilterSelected(self.list.filter()),
        ];
        updates.extend(self.grid_updates());
        updates.push(ViewUpdate::Analytics(self.analytics.clone()));
        updates
    }

    pub fn handle(&mut self, event: ClientEvent) -> Vec<ViewUpdate> {
        match event {
            ClientEvent::SelectTab { tab } => {
                self.tab = tab;
                vec![ViewUpdate::TabSelected(tab)]
            }
            ClientEvent::ApplyFilter { filter } => {
                self.list.set_filter(filter);
                let mut updates = vec![ViewUpdate::FilterSelected(filter)];
                updates.extend(self.grid_updates());
                updates
            }
            ClientEvent::SearchInput { term } => self.apply_search(&term),
            ClientEvent::LoadMore => self.load_more(),
            ClientEvent::OpenRepository { position } => self.open_repository(position),
            ClientEvent::OpenFollowers => self.open_followers(),
            ClientEvent::CloseModal { modal } => self.close_modal(modal),
        }
    }

    pub fn apply_search(&mut self, term: &str) -> Vec<ViewUpdate> {
        self.list.set_search(term);
        self.grid_updates()
    }

    pub fn streak_estimated(&self, streak: Streak) -> Vec<ViewUpdate> {
        vec![ViewUpdate::Streak(streak)]
    }

    fn load_more(&mut self) -> Vec<ViewUpdate> {
        let revealed = self.list.load_more();
        if revealed.is_empty() {
            return vec![ViewUpdate::LoadMore {
                remaining: self.list.remaining(),
            }];
        }

        vec![
            ViewUpdate::Grid {
                first_position: revealed.start,
                repositories: self.list.slice(revealed).cloned().collect(),
                append: true,
            },
            ViewUpdate::LoadMore {
                remaining: self.list.remaining(),
            },
        ]
    }

    fn open_repository(&mut self, position: usize) -> Vec<ViewUpdate> {
        if position >= self.list.revealed_len() {
            tracing::debug!("Ignoring click on unrevealed position {}", position);
            return Vec::new();
        }
        match self.list.get(position) {
            Some(repository) => {
                self.open_modal = Some(Modal::Repository);
                vec![ViewUpdate::RepositoryDetail(repository.clone())]
            }
            None => Vec::new(),
        }
    }

    pub fn open_followers(&mut self) -> Vec<ViewUpdate> {
        self.open_modal = Some(Modal::Followers);
        vec![ViewUpdate::FollowersLoading]
    }

    /// Delivers the followers list unless the modal was closed meanwhile.
    pub fn followers_loaded(&self, followers: FetchOutcome<Vec<Follower>>) -> Vec<ViewUpdate> {
        if self.open_modal == Some(Modal::Followers) {
            vec![ViewUpdate::Followers(followers)]
        } else {
            Vec::new()
        }
    }

    fn close_modal(&mut self, modal: Modal) -> Vec<ViewUpdate> {
        if self.open_modal == Some(modal) {
            self.open_modal = None;
        }
        vec![ViewUpdate::ModalClosed(modal)]
    }

    /// Grid from the first page plus the load-more control.
    fn grid_updates(&self) -> Vec<ViewUpdate> {
        if self.list.repositories().is_empty() {
            return vec![ViewUpdate::EmptyGrid, ViewUpdate::LoadMore { remaining: 0 }];
        }

        vec![
            ViewUpdate::Grid {
                repositories: self.list.visible().cloned().collect(),
                first_position: 0,
                append: false,
            },
            ViewUpdate::LoadMore {
                remaining: self.list.remaining(),
            },
        ]
    }
}
