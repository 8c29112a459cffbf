use crate::dashboard::ManagementService;
use crate::store::Repositories;
use crate::user_auth::{Principal, SessionKeys};

use super::flash::{FlashMessage, FlashStore};
use super::response::{Page, Rendered};
use super::screen::Screen;

/// Gateway application state (shared)
pub struct AppState {
    /// Dashboard operations
    pub service: ManagementService,
    /// Used by the session middleware to resolve principals
    pub repos: Repositories,
    pub sessions: SessionKeys,
    pub flash: FlashStore,
}

impl AppState {
    pub fn new(service: ManagementService, repos: Repositories, sessions: SessionKeys) -> Self {
        Self {
            service,
            repos,
            sessions,
            flash: FlashStore::new(),
        }
    }

    /// Render a screen, handing it every pending flash message
    pub fn render<V>(&self, principal: &Principal, template: &'static str, view: V) -> Page<V> {
        Page::Render(Rendered {
            template,
            view,
            messages: self.flash.take(principal.user_id),
        })
    }

    /// Queue one flash message and redirect
    pub fn redirect<V>(&self, principal: &Principal, to: Screen, message: FlashMessage) -> Page<V> {
        self.flash.push(principal.user_id, message);
        Page::Redirect(to.path())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::account::User;
    use crate::catalog::Game;
    use crate::checkout::Order;
    use crate::media::MediaStore;
    use crate::store::{MemoryStore, Seed};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    pub const ADMIN_ID: i64 = 1;
    pub const CUSTOMER_ID: i64 = 2;

    fn user(id: i64, username: &str, is_superuser: bool) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            is_superuser,
            date_joined: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn game(id: i64, name: &str, cents: i64) -> Game {
        Game {
            id,
            name: name.to_string(),
            description: format!("About {}", name),
            platform: "PC".to_string(),
            price: Decimal::new(cents, 2),
            image: None,
        }
    }

    fn order(number: &str, day: u32, order_total: i64, grand_total: i64) -> Order {
        Order {
            order_number: number.to_string(),
            user_id: Some(CUSTOMER_ID),
            full_name: "Mario Mario".to_string(),
            email: "mario@example.com".to_string(),
            date: Utc.with_ymd_and_hms(2024, 6, day, 10, 0, 0).unwrap(),
            order_total: Decimal::new(order_total, 2),
            grand_total: Decimal::new(grand_total, 2),
        }
    }

    /// Gateway state over a seeded in-memory store
    pub fn test_state() -> (Arc<AppState>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::from_seed(Seed {
            games: vec![
                game(1, "Hollow Knight", 1499),
                game(2, "Celeste", 1999),
                game(3, "Dark Souls", 3999),
            ],
            users: vec![user(ADMIN_ID, "admin", true), user(CUSTOMER_ID, "mario", false)],
            orders: vec![
                order("A1B2C3", 1, 1850, 1999),
                order("D4E5F6", 2, 450, 500),
            ],
            audit_log: vec![],
        }));
        let repos = Repositories::in_memory(store.clone());
        let media_root =
            std::env::temp_dir().join(format!("gamestore-gateway-{}", uuid::Uuid::new_v4()));
        let service = ManagementService::new(
            repos.clone(),
            MediaStore::new(media_root, "/media/"),
            1024,
            5,
        );
        let state = AppState::new(service, repos, SessionKeys::new("test-secret"));
        (Arc::new(state), store)
    }

    #[test]
    fn test_render_drains_flash_once() {
        let (state, _store) = test_state();
        let principal = Principal {
            user_id: ADMIN_ID,
            username: "admin".to_string(),
            is_superuser: true,
        };

        let page: Page<()> = state.redirect(&principal, Screen::Dashboard, FlashMessage::success("done"));
        assert_eq!(page.redirect_location(), Some("/dashboard/"));

        let first = state.render(&principal, "t.html", ());
        assert_eq!(first.rendered().unwrap().messages.len(), 1);
        let second = state.render(&principal, "t.html", ());
        assert!(second.rendered().unwrap().messages.is_empty());
    }
}
