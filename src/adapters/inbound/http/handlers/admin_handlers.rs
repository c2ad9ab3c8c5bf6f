use axum::{
    extract::{
        multipart::{Multipart, MultipartError},
        rejection::FormRejection,
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    adapters::inbound::http::{
        dto::{AdminQueryDto, AdminTractorDto, DeleteConfirmationDto, ErrorResponseDto},
        middleware::{
            access_token, clear_session_cookie, resolve_session, session_cookie, AdminContext,
        },
        router::AppState,
        views::{self, Banner, DashboardRow, DashboardView},
    },
    domain::{
        errors::CatalogError,
        models::{Credentials, StagedImage, TractorForm},
    },
    services::{AdminWorkflow, Confirmation},
};

const SAVE_FAILED: &str = "Erro ao salvar";
const REMOVE_FAILED: &str = "Erro ao remover";
const LOAD_FAILED: &str = "Erro ao carregar";

/// Admin form as posted: raw field values plus the chosen files
#[derive(Debug, Default)]
pub struct TractorSubmission {
    pub form: TractorForm,
    pub main_image: Option<StagedImage>,
    pub gallery: Vec<StagedImage>,
}

fn is_checked(value: &str) -> bool {
    matches!(value, "true" | "on" | "1")
}

fn apply_form_field(form: &mut TractorForm, name: &str, value: String) {
    match name {
        "name" => form.name = value,
        "price" => form.price = value,
        "description" => form.description = value,
        "engine" => form.engine = value,
        "horsepower" => form.horsepower = value,
        "drivetrain" => form.drivetrain = value,
        "hours_of_use" => form.hours_of_use = value,
        "condition" => form.condition = value,
        "location" => form.location = value,
        "year" => form.year = value,
        "single_owner" => form.single_owner = is_checked(&value),
        "is_available" => form.is_available = is_checked(&value),
        other => warn!(field = other, "Ignoring unknown form field"),
    }
}

/// Read the multipart admin form. Unchecked checkboxes are simply absent
pub async fn read_submission(mut multipart: Multipart) -> Result<TractorSubmission, MultipartError> {
    let mut submission = TractorSubmission {
        form: TractorForm {
            single_owner: false,
            is_available: false,
            ..TractorForm::default()
        },
        ..Default::default()
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "main_image" | "gallery_images" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;

                // An empty file input still sends a part
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                let image = StagedImage::new(file_name, content_type, data);
                if name == "main_image" {
                    submission.main_image = Some(image);
                } else {
                    submission.gallery.push(image);
                }
            }
            _ => {
                let value = field.text().await?;
                apply_form_field(&mut submission.form, &name, value);
            }
        }
    }

    Ok(submission)
}

fn build_workflow(app_state: &AppState) -> Result<AdminWorkflow, Response> {
    app_state.admin.build().map_err(|e| {
        error!(error = e, "Admin workflow is not configured");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(views::error_page(LOAD_FAILED, "Painel indisponível.").into_string()),
        )
            .into_response()
    })
}

async fn dashboard_view(
    app_state: &AppState,
    context: &AdminContext,
    workflow: &AdminWorkflow,
    banner: Option<Banner>,
) -> DashboardView {
    let rows = match workflow.listings().await {
        Ok(tractors) => tractors
            .into_iter()
            .map(|tractor| DashboardRow {
                image_public_url: app_state.images.public_url(tractor.image()),
                formatted_price: tractor.details.price.format_brl(),
                tractor,
            })
            .collect(),
        Err(e) => {
            warn!(error = %e, "Error fetching tractors");
            Vec::new()
        }
    };

    DashboardView {
        user_email: context.session.user_email.clone(),
        rows,
        form: workflow.form().clone(),
        editing: workflow.editing().cloned(),
        stored_main_image_url: workflow.stored_main_image_url(),
        existing_gallery: workflow
            .existing_gallery()
            .iter()
            .map(|image| (image.clone(), app_state.images.public_url(&image.image_url)))
            .collect(),
        max_upload_bytes: app_state.images.max_upload_bytes(),
        banner,
    }
}

/// Re-render the dashboard with a generic error banner and the error's status
async fn failure(
    app_state: &AppState,
    context: &AdminContext,
    workflow: &AdminWorkflow,
    title: &'static str,
    e: CatalogError,
) -> Response {
    let status = StatusCode::from(&e);
    if status.is_server_error() {
        error!(error = %e, "{}", title);
    } else {
        warn!(error = %e, "{}", title);
    }

    let detail = match &e {
        CatalogError::Validation(validation) => Some(validation.to_string()),
        CatalogError::TractorNotFound { .. } => Some("Trator não encontrado.".to_string()),
        CatalogError::GalleryImageNotFound { .. } => Some("Imagem não encontrada.".to_string()),
        CatalogError::ConfirmationRequired => Some("Confirme a exclusão.".to_string()),
        CatalogError::GalleryUpload { .. } => Some(
            "O trator foi salvo, mas as imagens da galeria não foram enviadas.".to_string(),
        ),
        _ => None,
    };

    let view = dashboard_view(app_state, context, workflow, Some(Banner { title, detail })).await;
    (status, Html(views::dashboard_page(&view).into_string())).into_response()
}

/// Admin dashboard, or the login form when there is no session
pub async fn admin_page(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AdminQueryDto>,
) -> Response {
    let Some(session) = resolve_session(&app_state, &headers).await else {
        return Html(views::login_page(None).into_string()).into_response();
    };
    let context = AdminContext { session };

    let mut workflow = match build_workflow(&app_state) {
        Ok(workflow) => workflow,
        Err(response) => return response,
    };

    if let Some(id) = query.edit {
        if let Err(e) = workflow.begin_edit(id).await {
            return failure(&app_state, &context, &workflow, LOAD_FAILED, e).await;
        }
    }

    let view = dashboard_view(&app_state, &context, &workflow, None).await;
    Html(views::dashboard_page(&view).into_string()).into_response()
}

pub async fn login(
    State(app_state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Response {
    match app_state.auth.sign_in(&credentials).await {
        Ok(session) => (
            [(header::SET_COOKIE, session_cookie(&session))],
            Redirect::to("/admin"),
        )
            .into_response(),
        Err(e) => (
            StatusCode::UNAUTHORIZED,
            Html(views::login_page(Some(&e.to_string())).into_string()),
        )
            .into_response(),
    }
}

pub async fn logout(State(app_state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = access_token(&headers) {
        // The gateway logs the failure; the cookie goes either way
        let _ = app_state.auth.sign_out(&token).await;
    }

    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

async fn submit_tractor(
    app_state: AppState,
    context: AdminContext,
    editing: Option<Uuid>,
    multipart: Multipart,
) -> Response {
    let mut workflow = match build_workflow(&app_state) {
        Ok(workflow) => workflow,
        Err(response) => return response,
    };

    if let Some(id) = editing {
        if let Err(e) = workflow.begin_edit(id).await {
            return failure(&app_state, &context, &workflow, SAVE_FAILED, e).await;
        }
    }

    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            warn!(error = %e, "Malformed admin form");
            return (
                StatusCode::BAD_REQUEST,
                Html(views::error_page(SAVE_FAILED, "Formulário inválido.").into_string()),
            )
                .into_response();
        }
    };

    workflow.set_form(submission.form);

    if let Some(main_image) = submission.main_image {
        if let Err(e) = workflow.stage_main_image(main_image) {
            return failure(&app_state, &context, &workflow, SAVE_FAILED, e.into()).await;
        }
    }

    let skipped = workflow.stage_gallery_images(submission.gallery);
    if skipped > 0 {
        warn!(skipped, "Skipped gallery files that are not images");
    }

    match workflow.submit().await {
        Ok(outcome) => {
            info!(
                tractor_id = %outcome.tractor.id,
                created = outcome.created,
                gallery_added = outcome.new_gallery.len(),
                by = %context.session.user_email,
                "Tractor saved"
            );
            Redirect::to("/admin").into_response()
        }
        Err(e) => failure(&app_state, &context, &workflow, SAVE_FAILED, e).await,
    }
}

pub async fn create_tractor(
    State(app_state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    multipart: Multipart,
) -> Response {
    submit_tractor(app_state, context, None, multipart).await
}

pub async fn update_tractor(
    State(app_state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Response {
    submit_tractor(app_state, context, Some(id), multipart).await
}

pub async fn delete_tractor(
    State(app_state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Path(id): Path<Uuid>,
    form: Result<Form<DeleteConfirmationDto>, FormRejection>,
) -> Response {
    let workflow = match build_workflow(&app_state) {
        Ok(workflow) => workflow,
        Err(response) => return response,
    };

    let confirmed = form.map(|Form(dto)| dto.is_confirmed()).unwrap_or(false);

    match workflow
        .delete_listing(id, Confirmation::from(confirmed))
        .await
    {
        Ok(report) => {
            if !report.is_complete() {
                warn!(
                    tractor_id = %id,
                    failed = report.failed().count(),
                    "Tractor deleted but some images were left in storage"
                );
            }
            Redirect::to("/admin").into_response()
        }
        Err(e) => failure(&app_state, &context, &workflow, REMOVE_FAILED, e).await,
    }
}

pub async fn delete_gallery_image(
    State(app_state): State<AppState>,
    Extension(context): Extension<AdminContext>,
    Path(image_id): Path<Uuid>,
) -> Response {
    let mut workflow = match build_workflow(&app_state) {
        Ok(workflow) => workflow,
        Err(response) => return response,
    };

    match workflow.remove_existing_gallery_image(image_id).await {
        Ok((image, _report)) => {
            Redirect::to(&format!("/admin?edit={}", image.tractor_id)).into_response()
        }
        Err(e) => failure(&app_state, &context, &workflow, REMOVE_FAILED, e).await,
    }
}

/// Handle listing every tractor for the admin API
pub async fn list_admin_tractors(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<AdminTractorDto>>, (StatusCode, Json<ErrorResponseDto>)> {
    let workflow = app_state.admin.build().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponseDto::internal_error(e)),
        )
    })?;

    let tractors = workflow.listings().await.map_err(|e| {
        error!(error = %e, "Error fetching tractors");
        (
            StatusCode::from(&e),
            Json(ErrorResponseDto::from_catalog_error(&e)),
        )
    })?;

    Ok(Json(
        tractors
            .into_iter()
            .map(|tractor| AdminTractorDto {
                image_public_url: app_state.images.public_url(tractor.image()),
                formatted_price: tractor.details.price.format_brl(),
                tractor,
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_values() {
        assert!(is_checked("true"));
        assert!(is_checked("on"));
        assert!(!is_checked(""));
        assert!(!is_checked("false"));
    }

    #[test]
    fn test_apply_form_field() {
        let mut form = TractorForm::default();
        apply_form_field(&mut form, "name", "Valtra BM125".to_string());
        apply_form_field(&mut form, "drivetrain", "4x2".to_string());
        apply_form_field(&mut form, "single_owner", "on".to_string());
        apply_form_field(&mut form, "unknown", "x".to_string());

        assert_eq!(form.name, "Valtra BM125");
        assert_eq!(form.drivetrain, "4x2");
        assert!(form.single_owner);
    }
}
