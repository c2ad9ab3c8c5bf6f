//! HTML pages rendered with maud

use maud::{html, Markup, DOCTYPE};
use uuid::Uuid;

use crate::domain::models::{
    GalleryImage, ListingCard, ListingDetail, Tractor, TractorForm, CONDITION_OPTIONS,
    DRIVETRAIN_OPTIONS,
};

const SITE_NAME: &str = "JR Tratores";

/// Error banner shown above the admin dashboard
#[derive(Debug, Clone)]
pub struct Banner {
    pub title: &'static str,
    pub detail: Option<String>,
}

/// A row of the admin listing table
#[derive(Debug, Clone)]
pub struct DashboardRow {
    pub tractor: Tractor,
    pub image_public_url: String,
    pub formatted_price: String,
}

/// Everything the admin dashboard shows
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub user_email: String,
    pub rows: Vec<DashboardRow>,
    pub form: TractorForm,
    pub editing: Option<Tractor>,
    pub stored_main_image_url: Option<String>,
    pub existing_gallery: Vec<(GalleryImage, String)>,
    pub max_upload_bytes: usize,
    pub banner: Option<Banner>,
}

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                header.site-header {
                    a href="/" { (SITE_NAME) }
                }
                main { (body) }
            }
        }
    }
}

fn detail_href(id: Uuid, image: usize, lightbox: bool) -> String {
    if lightbox {
        format!("/trator/{}?image={}&lightbox=true", id, image)
    } else {
        format!("/trator/{}?image={}", id, image)
    }
}

pub fn catalog_page(cards: &[ListingCard]) -> Markup {
    layout(
        SITE_NAME,
        html! {
            h1 { "Tratores disponíveis" }
            @if cards.is_empty() {
                p.empty { "Nenhum trator disponível no momento." }
            } @else {
                section.catalog-grid {
                    @for card in cards {
                        article.card {
                            a href=(format!("/trator/{}", card.tractor.id)) {
                                img src=(card.image_public_url) alt=(card.tractor.name());
                                h2 { (card.tractor.name()) }
                            }
                            p.price { (card.formatted_price) }
                            p.description { (card.tractor.details.description) }
                            a.contact href=(card.contact_link) target="_blank" rel="noopener" {
                                "Tenho interesse"
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn detail_page(detail: &ListingDetail) -> Markup {
    let tractor = &detail.tractor;
    let carousel = &detail.carousel;
    let index = carousel.index();

    layout(
        &format!("{} | {}", tractor.name(), SITE_NAME),
        html! {
            a.back href="/" { "← Voltar ao catálogo" }
            article.product {
                section.carousel {
                    @if let Some(current) = carousel.current() {
                        a href=(detail_href(tractor.id, index, true)) {
                            img.current src=(current) alt=(tractor.name());
                        }
                    }
                    @if carousel.has_navigation() {
                        nav.carousel-controls {
                            a.previous href=(detail_href(tractor.id, carousel.previous_index(), false)) { "‹" }
                            span { (index + 1) " / " (carousel.len()) }
                            a.next href=(detail_href(tractor.id, carousel.next_index(), false)) { "›" }
                        }
                        ul.thumbnails {
                            @for (i, url) in carousel.images().iter().enumerate() {
                                li.selected[i == index] {
                                    a href=(detail_href(tractor.id, i, false)) {
                                        img src=(url) alt=(format!("{} - foto {}", tractor.name(), i + 1));
                                    }
                                }
                            }
                        }
                    }
                }
                section.summary {
                    h1 { (tractor.name()) }
                    p.price { (detail.formatted_price) }
                    @if !tractor.is_available() {
                        p.unavailable { "Indisponível" }
                    }
                    p.description { (tractor.details.description) }
                    @let specs = tractor.specifications();
                    @if !specs.is_empty() {
                        h2 { "Especificações" }
                        table.specifications {
                            @for (label, value) in &specs {
                                tr {
                                    th { (label) }
                                    td { (value) }
                                }
                            }
                        }
                    }
                    a.contact href=(detail.contact_link) target="_blank" rel="noopener" {
                        "Entrar em contato via WhatsApp"
                    }
                }
            }
            @if detail.lightbox {
                @if let Some(current) = carousel.current() {
                    div.lightbox {
                        a.close href=(detail_href(tractor.id, index, false)) { "Fechar" }
                        @if carousel.has_navigation() {
                            a.previous href=(detail_href(tractor.id, carousel.previous_index(), true)) { "‹" }
                        }
                        img src=(current) alt=(tractor.name());
                        @if carousel.has_navigation() {
                            a.next href=(detail_href(tractor.id, carousel.next_index(), true)) { "›" }
                        }
                    }
                }
            }
        },
    )
}

pub fn not_found_page() -> Markup {
    layout(
        &format!("Trator não encontrado | {}", SITE_NAME),
        html! {
            h1 { "Trator não encontrado" }
            a href="/" { "Voltar ao catálogo" }
        },
    )
}

pub fn error_page(title: &str, message: &str) -> Markup {
    layout(
        &format!("{} | {}", title, SITE_NAME),
        html! {
            h1 { (title) }
            p { (message) }
            a href="/" { "Voltar ao catálogo" }
        },
    )
}

pub fn login_page(error: Option<&str>) -> Markup {
    layout(
        &format!("Admin | {}", SITE_NAME),
        html! {
            h1 { "Área administrativa" }
            @if let Some(error) = error {
                p.error role="alert" { (error) }
            }
            form method="post" action="/admin/login" {
                label { "Email" input type="email" name="email" required; }
                label { "Senha" input type="password" name="password" required; }
                button type="submit" { "Entrar" }
            }
        },
    )
}

fn select_field(label: &str, name: &str, options: &[&str], current: &str) -> Markup {
    let custom = !current.is_empty() && !options.contains(&current);

    html! {
        label {
            (label)
            select name=(name) {
                @for choice in options {
                    option value=(choice) selected[*choice == current] { (choice) }
                }
                @if custom {
                    option value=(current) selected { (current) }
                }
            }
        }
    }
}

fn tractor_form(view: &DashboardView) -> Markup {
    let form = &view.form;
    let action = match &view.editing {
        Some(tractor) => format!("/admin/tractors/{}", tractor.id),
        None => "/admin/tractors".to_string(),
    };
    let max_mb = view.max_upload_bytes / (1024 * 1024);

    html! {
        form.tractor-form method="post" action=(action) enctype="multipart/form-data" {
            h2 {
                @if view.editing.is_some() { "Editar trator" } @else { "Novo trator" }
            }
            label { "Nome" input type="text" name="name" value=(form.name) required; }
            label { "Preço" input type="number" name="price" step="0.01" min="0" value=(form.price) required; }
            label { "Descrição" textarea name="description" { (form.description) } }
            label { "Motor" input type="text" name="engine" value=(form.engine); }
            label { "Potência" input type="text" name="horsepower" value=(form.horsepower); }
            (select_field("Tração", "drivetrain", &DRIVETRAIN_OPTIONS, &form.drivetrain))
            label { "Horas de uso" input type="number" name="hours_of_use" min="0" value=(form.hours_of_use); }
            (select_field("Estado", "condition", &CONDITION_OPTIONS, &form.condition))
            label { "Localização" input type="text" name="location" value=(form.location); }
            label { "Ano" input type="number" name="year" value=(form.year); }
            label {
                input type="checkbox" name="single_owner" value="true" checked[form.single_owner];
                "Único dono"
            }
            label {
                input type="checkbox" name="is_available" value="true" checked[form.is_available];
                "Disponível"
            }

            fieldset {
                legend { "Imagem principal" }
                @if let Some(url) = &view.stored_main_image_url {
                    img.preview src=(url) alt="Imagem atual";
                }
                input type="file" name="main_image" accept="image/*" required[view.editing.is_none()];
                small { "PNG, JPG ou WEBP até " (max_mb) "MB" }
            }

            fieldset {
                legend { "Galeria" }
                @if !view.existing_gallery.is_empty() {
                    ul.gallery {
                        @for (image, url) in &view.existing_gallery {
                            li {
                                img src=(url) alt="Foto da galeria";
                                button type="submit"
                                    formaction=(format!("/admin/gallery/{}/delete", image.id))
                                    formmethod="post"
                                    formenctype="application/x-www-form-urlencoded"
                                    formnovalidate {
                                    "Remover"
                                }
                            }
                        }
                    }
                }
                input type="file" name="gallery_images" accept="image/*" multiple;
            }

            button type="submit" {
                @if view.editing.is_some() { "Atualizar" } @else { "Salvar" }
            }
            @if view.editing.is_some() {
                a.cancel href="/admin" { "Cancelar" }
            }
        }
    }
}

pub fn dashboard_page(view: &DashboardView) -> Markup {
    layout(
        &format!("Admin | {}", SITE_NAME),
        html! {
            header.admin-header {
                span { (view.user_email) }
                form method="post" action="/admin/logout" {
                    button type="submit" { "Sair" }
                }
            }
            @if let Some(banner) = &view.banner {
                div.error role="alert" {
                    strong { (banner.title) }
                    @if let Some(detail) = &banner.detail {
                        p { (detail) }
                    }
                }
            }
            (tractor_form(view))
            h2 { "Tratores cadastrados" }
            @if view.rows.is_empty() {
                p.empty { "Nenhum trator cadastrado." }
            } @else {
                table.listings {
                    thead {
                        tr { th { "Imagem" } th { "Nome" } th { "Preço" } th { "Status" } th {} }
                    }
                    tbody {
                        @for row in &view.rows {
                            tr {
                                td { img.thumbnail src=(row.image_public_url) alt=(row.tractor.name()); }
                                td { (row.tractor.name()) }
                                td { (row.formatted_price) }
                                td {
                                    @if row.tractor.is_available() { "Disponível" } @else { "Indisponível" }
                                }
                                td.actions {
                                    a href=(format!("/admin?edit={}", row.tractor.id)) { "Editar" }
                                    form method="post" action=(format!("/admin/tractors/{}/delete", row.tractor.id)) {
                                        input type="hidden" name="confirm" value="true";
                                        button type="submit"
                                            onclick="return confirm('Tem certeza que deseja excluir este trator?')" {
                                            "Excluir"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_href() {
        let id = Uuid::nil();
        assert_eq!(
            detail_href(id, 2, true),
            format!("/trator/{}?image=2&lightbox=true", id)
        );
        assert_eq!(detail_href(id, 0, false), format!("/trator/{}?image=0", id));
    }

    #[test]
    fn test_login_page_shows_error() {
        let page = login_page(Some("Email ou senha incorretos.")).into_string();
        assert!(page.contains("Email ou senha incorretos."));
        assert!(page.contains("action=\"/admin/login\""));
    }

    #[test]
    fn test_select_keeps_custom_value() {
        let markup = select_field("Tração", "drivetrain", &DRIVETRAIN_OPTIONS, "8x8").into_string();
        assert!(markup.contains("<option value=\"8x8\" selected>8x8</option>"));
    }
}
