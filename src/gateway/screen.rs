//! Screens the dashboard renders or redirects to

/// Redirect targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Login { next: String },
    Dashboard,
    GameDetail(i64),
    GamesManagement,
    UsersManagement,
    OrdersManagement,
}

impl Screen {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login { next } => {
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("next", next)
                    .finish();
                format!("/accounts/login/?{}", query)
            }
            Self::Dashboard => "/dashboard/".to_string(),
            Self::GameDetail(id) => format!("/games/{}/", id),
            Self::GamesManagement => "/dashboard/games_management/".to_string(),
            Self::UsersManagement => "/dashboard/users_management/".to_string(),
            Self::OrdersManagement => "/dashboard/orders_management/".to_string(),
        }
    }
}

/// Template names handed to the rendering frontend
pub mod templates {
    pub const DASHBOARD: &str = "dashboard/dashboard.html";
    pub const ADD_GAME: &str = "dashboard/add_game.html";
    pub const EDIT_GAME: &str = "dashboard/edit_game.html";
    pub const GAMES_MANAGEMENT: &str = "dashboard/games_management.html";
    pub const USERS_MANAGEMENT: &str = "dashboard/users_management.html";
    pub const ORDERS_MANAGEMENT: &str = "dashboard/orders_management.html";
}
