pub mod config;
pub mod telemetry;

pub mod domain {
    pub mod external_apis {
        pub mod github;
    }
    pub mod models {
        pub mod activity;
        pub mod profile;
        pub mod repository;
    }
    pub mod services {
        pub mod analytics;
        pub mod listing;
        pub mod metrics;
        pub mod streak;
    }
}

pub mod application {
    pub mod debounce;
    pub mod session;
    #[cfg(test)]
    pub(crate) mod testing;
    pub mod use_cases {
        pub mod estimate_streak;
        pub mod list_followers;
        pub mod load_dashboard;
    }
}

pub mod infrastructures {
    pub mod adapters {
        pub mod primary {
            pub mod html {
                pub mod analytics;
                pub mod format;
                pub mod modals;
                pub mod page;
                pub mod profile;
                pub mod repositories;
                pub mod updates;
            }
            pub mod web;
        }
        pub mod secondary {
            pub mod external_apis {
                pub mod github;
            }
        }
    }
}
