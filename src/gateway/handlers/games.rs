//! Add / edit / delete game screens (superuser only)

use std::sync::Arc;

use axum::{
    Extension,
    extract::{Multipart, Path, State, multipart::MultipartError},
};

use crate::catalog::{FieldErrors, GameForm, UploadedImage};
use crate::dashboard::{DashboardError, GameFormView};
use crate::user_auth::{Principal, Superuser};

use super::super::flash::FlashMessage;
use super::super::response::Page;
use super::super::screen::{Screen, templates};
use super::super::state::AppState;

const ADD_FAILED: &str = "Failed to add the Game. Please ensure the form is valid!";
const UPDATE_FAILED: &str = "Failed to update the Game. Please ensure the form is valid!";

fn malformed(e: MultipartError) -> DashboardError {
    DashboardError::MalformedForm(e.to_string())
}

/// Collect the game form fields and the optional `image` file from a
/// multipart body. A file input left empty counts as no upload.
pub async fn read_game_submission(
    mut multipart: Multipart,
) -> Result<(GameForm, Option<UploadedImage>), DashboardError> {
    let mut form = GameForm::default();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => form.name = field.text().await.map_err(malformed)?,
            "description" => form.description = field.text().await.map_err(malformed)?,
            "platform" => form.platform = field.text().await.map_err(malformed)?,
            "price" => form.price = field.text().await.map_err(malformed)?,
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(malformed)?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                upload = Some(UploadedImage {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok((form, upload))
}

/// GET /dashboard/add_game/
#[utoipa::path(
    get,
    path = "/dashboard/add_game/",
    responses(
        (status = 200, description = "Empty game form"),
        (status = 303, description = "Not a superuser, or no session")
    ),
    security(("session_token" = [])),
    tag = "Admin"
)]
pub async fn add_game_form(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Extension(_admin): Extension<Superuser>,
) -> Page<GameFormView> {
    state.render(
        &principal,
        templates::ADD_GAME,
        GameFormView {
            game: None,
            form: GameForm::default(),
            errors: FieldErrors::default(),
            image_url: None,
        },
    )
}

/// POST /dashboard/add_game/
#[utoipa::path(
    post,
    path = "/dashboard/add_game/",
    request_body(content = GameForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Added; redirected to the game page"),
        (status = 200, description = "Form re-rendered with field errors")
    ),
    security(("session_token" = [])),
    tag = "Admin"
)]
pub async fn add_game(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Extension(admin): Extension<Superuser>,
    multipart: Multipart,
) -> Result<Page<GameFormView>, DashboardError> {
    let (form, upload) = read_game_submission(multipart).await?;
    submit_new_game(&state, &principal, &admin, form, upload).await
}

pub async fn submit_new_game(
    state: &AppState,
    principal: &Principal,
    admin: &Superuser,
    form: GameForm,
    upload: Option<UploadedImage>,
) -> Result<Page<GameFormView>, DashboardError> {
    match state.service.add_game(admin, &form, upload.as_ref()).await {
        Ok(game) => Ok(state.redirect(
            principal,
            Screen::GameDetail(game.id),
            FlashMessage::success("Successfully added the Game!"),
        )),
        Err(DashboardError::InvalidGameForm(errors)) => {
            state.flash.push(principal.user_id, FlashMessage::error(ADD_FAILED));
            Ok(state.render(
                principal,
                templates::ADD_GAME,
                GameFormView {
                    game: None,
                    form,
                    errors,
                    image_url: None,
                },
            ))
        }
        Err(e) => Err(e),
    }
}

/// GET /dashboard/edit_game/{game_id}/
#[utoipa::path(
    get,
    path = "/dashboard/edit_game/{game_id}/",
    params(("game_id" = i64, Path, description = "Game to edit")),
    responses(
        (status = 200, description = "Form prefilled from the stored game"),
        (status = 404, description = "Unknown game")
    ),
    security(("session_token" = [])),
    tag = "Admin"
)]
pub async fn edit_game_form(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Extension(admin): Extension<Superuser>,
    Path(game_id): Path<i64>,
) -> Result<Page<GameFormView>, DashboardError> {
    let game = state.service.game_for_edit(&admin, game_id).await?;

    state.flash.push(
        principal.user_id,
        FlashMessage::info(format!("you are now editing {}!", game.name)),
    );
    let image_url = game.image.as_deref().map(|p| state.service.media().url_for(p));
    Ok(state.render(
        &principal,
        templates::EDIT_GAME,
        GameFormView {
            form: GameForm::from_game(&game),
            game: Some(game),
            errors: FieldErrors::default(),
            image_url,
        },
    ))
}

/// POST /dashboard/edit_game/{game_id}/
#[utoipa::path(
    post,
    path = "/dashboard/edit_game/{game_id}/",
    params(("game_id" = i64, Path, description = "Game to update")),
    request_body(content = GameForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Updated; redirected to the game page"),
        (status = 200, description = "Form re-rendered with field errors"),
        (status = 404, description = "Unknown game")
    ),
    security(("session_token" = [])),
    tag = "Admin"
)]
pub async fn edit_game(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Extension(admin): Extension<Superuser>,
    Path(game_id): Path<i64>,
    multipart: Multipart,
) -> Result<Page<GameFormView>, DashboardError> {
    let (form, upload) = read_game_submission(multipart).await?;
    submit_game_update(&state, &principal, &admin, game_id, form, upload).await
}

pub async fn submit_game_update(
    state: &AppState,
    principal: &Principal,
    admin: &Superuser,
    game_id: i64,
    form: GameForm,
    upload: Option<UploadedImage>,
) -> Result<Page<GameFormView>, DashboardError> {
    match state
        .service
        .edit_game(admin, game_id, &form, upload.as_ref())
        .await
    {
        Ok(game) => Ok(state.redirect(
            principal,
            Screen::GameDetail(game.id),
            FlashMessage::success(format!("Successfully updated {}!", game.name)),
        )),
        Err(DashboardError::InvalidGameForm(errors)) => {
            let game = state.service.game_for_edit(admin, game_id).await?;
            state.flash.push(principal.user_id, FlashMessage::error(UPDATE_FAILED));
            let image_url = game.image.as_deref().map(|p| state.service.media().url_for(p));
            Ok(state.render(
                principal,
                templates::EDIT_GAME,
                GameFormView {
                    game: Some(game),
                    form,
                    errors,
                    image_url,
                },
            ))
        }
        Err(e) => Err(e),
    }
}

/// POST /dashboard/delete_game/{game_id}/
#[utoipa::path(
    post,
    path = "/dashboard/delete_game/{game_id}/",
    params(("game_id" = i64, Path, description = "Game to delete")),
    responses(
        (status = 303, description = "Deleted; redirected to the dashboard"),
        (status = 404, description = "Unknown game")
    ),
    security(("session_token" = [])),
    tag = "Admin"
)]
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Extension(admin): Extension<Superuser>,
    Path(game_id): Path<i64>,
) -> Result<Page<()>, DashboardError> {
    state.service.delete_game(&admin, game_id).await?;
    Ok(state.redirect(
        &principal,
        Screen::Dashboard,
        FlashMessage::success("Game deleted!"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GameRepository;
    use crate::gateway::flash::FlashLevel;
    use crate::gateway::state::tests::{ADMIN_ID, test_state};
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{Request, header},
    };
    use rust_decimal::Decimal;

    fn admin() -> (Principal, Superuser) {
        let principal = Principal {
            user_id: ADMIN_ID,
            username: "admin".to_string(),
            is_superuser: true,
        };
        let admin = principal.require_superuser().unwrap();
        (principal, admin)
    }

    fn form(name: &str, price: &str) -> GameForm {
        GameForm {
            name: name.to_string(),
            description: "Platforming.".to_string(),
            platform: "Switch".to_string(),
            price: price.to_string(),
        }
    }

    async fn multipart(body: &'static str) -> Multipart {
        let request = Request::builder()
            .method("POST")
            .uri("/dashboard/add_game/")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_read_game_submission_with_image() {
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"name\"\r\n\r\n\
            Celeste\r\n\
            --XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"platform\"\r\n\r\n\
            Switch\r\n\
            --XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"price\"\r\n\r\n\
            19.99\r\n\
            --XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"image\"; filename=\"cover.png\"\r\n\
            Content-Type: image/png\r\n\r\n\
            PNGDATA\r\n\
            --XBOUNDARY--\r\n";

        let (form, upload) = read_game_submission(multipart(body).await).await.unwrap();
        assert_eq!(form.name, "Celeste");
        assert_eq!(form.platform, "Switch");
        assert_eq!(form.price, "19.99");
        assert_eq!(form.description, "");

        let upload = upload.unwrap();
        assert_eq!(upload.file_name, "cover.png");
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(upload.bytes, b"PNGDATA".to_vec());
    }

    #[tokio::test]
    async fn test_read_game_submission_empty_file_input() {
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"name\"\r\n\r\n\
            Celeste\r\n\
            --XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"image\"; filename=\"\"\r\n\
            Content-Type: application/octet-stream\r\n\r\n\
            \r\n\
            --XBOUNDARY--\r\n";

        let (form, upload) = read_game_submission(multipart(body).await).await.unwrap();
        assert_eq!(form.name, "Celeste");
        assert!(upload.is_none());
    }

    #[tokio::test]
    async fn test_add_game_form_is_empty() {
        let (state, _store) = test_state();
        let (principal, admin) = admin();
        let page = add_game_form(State(state), Extension(principal), Extension(admin)).await;

        let rendered = page.rendered().unwrap();
        assert_eq!(rendered.template, templates::ADD_GAME);
        assert_eq!(rendered.view.form, GameForm::default());
        assert!(rendered.view.game.is_none());
    }

    #[tokio::test]
    async fn test_valid_add_redirects_to_game_detail() {
        let (state, store) = test_state();
        let (principal, admin) = admin();

        let page = submit_new_game(&state, &principal, &admin, form("Celeste 64", "0"), None)
            .await
            .unwrap();

        let games = store.list_by_name().await.unwrap();
        let added = games.iter().find(|g| g.name == "Celeste 64").unwrap();
        assert_eq!(added.price, Decimal::ZERO);
        assert_eq!(
            page.redirect_location().map(str::to_string),
            Some(format!("/games/{}/", added.id))
        );

        let messages = state.flash.take(ADMIN_ID);
        assert_eq!(messages, vec![FlashMessage::success("Successfully added the Game!")]);
    }

    #[tokio::test]
    async fn test_invalid_add_rerenders_with_errors() {
        let (state, store) = test_state();
        let (principal, admin) = admin();

        let page = submit_new_game(&state, &principal, &admin, form("", "1.234"), None)
            .await
            .unwrap();

        let rendered = page.rendered().unwrap();
        assert_eq!(rendered.template, templates::ADD_GAME);
        assert!(rendered.view.errors.get("name").is_some());
        assert!(rendered.view.errors.get("price").is_some());
        assert_eq!(rendered.view.form.price, "1.234");
        assert_eq!(rendered.messages.len(), 1);
        assert_eq!(rendered.messages[0].level, FlashLevel::Error);
        assert_eq!(rendered.messages[0].text, ADD_FAILED);
        assert_eq!(store.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_form_prefills_and_flashes_info() {
        let (state, _store) = test_state();
        let (principal, admin) = admin();

        let page = edit_game_form(State(state), Extension(principal), Extension(admin), Path(2))
            .await
            .unwrap();
        let rendered = page.rendered().unwrap();
        assert_eq!(rendered.template, templates::EDIT_GAME);
        assert_eq!(rendered.view.form.name, "Celeste");
        assert_eq!(rendered.view.form.price, "19.99");
        assert_eq!(
            rendered.messages,
            vec![FlashMessage::info("you are now editing Celeste!")]
        );
    }

    #[tokio::test]
    async fn test_edit_form_unknown_game() {
        let (state, _store) = test_state();
        let (principal, admin) = admin();
        let err = edit_game_form(State(state), Extension(principal), Extension(admin), Path(999))
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { id: 999, .. }));
    }

    #[tokio::test]
    async fn test_valid_update_redirects_with_new_name() {
        let (state, store) = test_state();
        let (principal, admin) = admin();

        let page = submit_game_update(&state, &principal, &admin, 2, form("Celeste DX", "9.99"), None)
            .await
            .unwrap();
        assert_eq!(page.redirect_location(), Some("/games/2/"));
        assert_eq!(
            state.flash.take(ADMIN_ID),
            vec![FlashMessage::success("Successfully updated Celeste DX!")]
        );
        let stored = GameRepository::find_by_id(&*store, 2).await.unwrap().unwrap();
        assert_eq!(stored.price, Decimal::new(999, 2));
    }

    #[tokio::test]
    async fn test_invalid_update_keeps_stored_game() {
        let (state, store) = test_state();
        let (principal, admin) = admin();

        let page = submit_game_update(&state, &principal, &admin, 2, form("Celeste", "-1"), None)
            .await
            .unwrap();
        let rendered = page.rendered().unwrap();
        assert_eq!(rendered.view.game.as_ref().map(|g| g.id), Some(2));
        assert_eq!(rendered.messages[0].text, UPDATE_FAILED);
        assert_eq!(store.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_game_redirects_to_dashboard() {
        let (state, store) = test_state();
        let (principal, admin) = admin();

        let page = delete_game(State(state.clone()), Extension(principal), Extension(admin), Path(1))
            .await
            .unwrap();
        assert_eq!(page.redirect_location(), Some("/dashboard/"));
        assert_eq!(state.flash.take(ADMIN_ID)[0].text, "Game deleted!");
        assert!(GameRepository::find_by_id(&*store, 1).await.unwrap().is_none());
    }
}
