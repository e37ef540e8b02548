use super::{analytics, modals, profile, repositories};
use crate::application::session::{Modal, ViewUpdate};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// DOM instruction pushed to the page over the session socket.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Replace the contents of `target`.
    Render { target: &'static str, html: String },
    /// Append to the contents of `target`.
    Append { target: &'static str, html: String },
    Visibility { target: &'static str, visible: bool },
    /// Mark `key` as the active member of `group` (tabs, filter buttons).
    Activate { group: &'static str, key: &'static str },
    Modal { target: &'static str, open: bool },
}

fn modal_target(modal: Modal) -> &'static str {
    match modal {
        Modal::Repository => "repo-modal",
        Modal::Followers => "followers-modal",
    }
}

/// Renders one view update into the DOM instructions that apply it.
pub fn render(update: &ViewUpdate, now: DateTime<Utc>) -> Vec<ServerMessage> {
    match update {
        ViewUpdate::Profile(p) => vec![ServerMessage::Render {
            target: "profile",
            html: profile::profile_card(p),
        }],
        ViewUpdate::Stats(stats) => vec![ServerMessage::Render {
            target: "stats",
            html: profile::stats_row(stats),
        }],
        ViewUpdate::Streak(streak) => vec![ServerMessage::Render {
            target: "streak",
            html: profile::streak_badge(streak),
        }],
        ViewUpdate::Analytics(a) => vec![
            ServerMessage::Render {
                target: "language-list",
                html: analytics::language_list(&a.languages),
            },
            ServerMessage::Render {
                target: "repo-stats",
                html: analytics::repository_statistics(&a.statistics),
            },
        ],
        ViewUpdate::Grid {
            repositories: repos,
            first_position,
            append,
        } => {
            let html = repositories::repository_cards(repos, *first_position, now);
            if *append {
                vec![ServerMessage::Append {
                    target: "repos-container",
                    html,
                }]
            } else {
                vec![ServerMessage::Render {
                    target: "repos-container",
                    html,
                }]
            }
        }
        ViewUpdate::EmptyGrid => vec![ServerMessage::Render {
            target: "repos-container",
            html: repositories::empty_state(),
        }],
        ViewUpdate::LoadMore { remaining } => vec![
            ServerMessage::Render {
                target: "load-more-count",
                html: remaining.to_string(),
            },
            ServerMessage::Visibility {
                target: "load-more",
                visible: *remaining > 0,
            },
        ],
        ViewUpdate::TabSelected(tab) => vec![ServerMessage::Activate {
            group: "tab",
            key: tab.as_str(),
        }],
        ViewUpdate::FilterSelected(filter) => vec![ServerMessage::Activate {
            group: "filter",
            key: filter.as_str(),
        }],
        ViewUpdate::RepositoryDetail(repository) => vec![
            ServerMessage::Render {
                target: "repo-modal-body",
                html: modals::repository_detail(repository, now),
            },
            ServerMessage::Modal {
                target: modal_target(Modal::Repository),
                open: true,
            },
        ],
        ViewUpdate::FollowersLoading => vec![
            ServerMessage::Render {
                target: "followers-list",
                html: modals::followers_loading(),
            },
            ServerMessage::Modal {
                target: modal_target(Modal::Followers),
                open: true,
            },
        ],
        ViewUpdate::Followers(followers) => vec![ServerMessage::Render {
            target: "followers-list",
            html: modals::followers_list(followers),
        }],
        ViewUpdate::ModalClosed(modal) => vec![ServerMessage::Modal {
            target: modal_target(*modal),
            open: false,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::Tab;
    use crate::domain::models::repository::fixtures::repository;

    #[test]
    fn test_messages_serialize_with_type_tag() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(ServerMessage::Visibility {
            target: "load-more",
            visible: false,
        })?;
        assert_eq!(
            json,
            serde_json::json!({"type": "visibility", "target": "load-more", "visible": false})
        );
        Ok(())
    }

    #[test]
    fn test_load_more_hidden_when_nothing_remains() {
        let now = Utc::now();
        let messages = render(&ViewUpdate::LoadMore { remaining: 0 }, now);
        assert!(messages.contains(&ServerMessage::Visibility {
            target: "load-more",
            visible: false,
        }));

        let messages = render(&ViewUpdate::LoadMore { remaining: 4 }, now);
        assert!(messages.contains(&ServerMessage::Visibility {
            target: "load-more",
            visible: true,
        }));
    }

    #[test]
    fn test_grid_append_versus_replace() {
        let now = Utc::now();
        let repositories = vec![repository("a", now)];

        let replace = render(
            &ViewUpdate::Grid {
                repositories: repositories.clone(),
                first_position: 0,
                append: false,
            },
            now,
        );
        assert!(matches!(replace[0], ServerMessage::Render { target: "repos-container", .. }));

        let append = render(
            &ViewUpdate::Grid {
                repositories,
                first_position: 9,
                append: true,
            },
            now,
        );
        assert!(matches!(append[0], ServerMessage::Append { target: "repos-container", .. }));
    }

    #[test]
    fn test_tabs_and_modals() {
        let now = Utc::now();
        assert_eq!(
            render(&ViewUpdate::TabSelected(Tab::Analytics), now),
            vec![ServerMessage::Activate {
                group: "tab",
                key: "analytics",
            }]
        );
        assert_eq!(
            render(&ViewUpdate::ModalClosed(Modal::Followers), now),
            vec![ServerMessage::Modal {
                target: "followers-modal",
                open: false,
            }]
        );
    }
}
