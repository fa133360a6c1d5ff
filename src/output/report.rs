use super::{CardView, PageView};
use crate::controls::{ControlKind, NavControl};

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_card(card: &CardView) -> String {
    let n = card.slot;
    let image = match card.image.as_ref() {
        Some(img) => format!(
            r#"<img class="card-image" id="card-image-{n}" src="{}" alt="{}"/>"#,
            escape_html(&img.url),
            escape_html(&img.alt)
        ),
        None => format!(r#"<img class="card-image" id="card-image-{n}" alt="" hidden/>"#),
    };
    format!(
        r#"    <article class="card">
      {image}
      <h2 id="personaje-{n}">{}</h2>
      <p id="aldea-personaje{n}">{}</p>
      <p id="clan-personaje{n}">{}</p>
      <p id="habilidades-personaje{n}">{}</p>
    </article>
"#,
        escape_html(&card.name),
        escape_html(&card.affiliation),
        escape_html(&card.clan),
        escape_html(&card.abilities),
    )
}

fn render_control(control: &NavControl) -> String {
    let label = escape_html(&control.label);
    let disabled = if control.enabled { "" } else { r#" aria-disabled="true""# };
    match control.kind {
        ControlKind::Previous => {
            format!(r#"<a href="?page=prev" class="arrows navigation-previous"{disabled}><p>{label}</p></a>"#)
        }
        ControlKind::Next => {
            format!(r#"<a href="?page=next" class="arrows navigation-next"{disabled}><p>{label}</p></a>"#)
        }
        ControlKind::Page(k) => {
            let class = if control.active {
                "pagination-button active"
            } else {
                "pagination-button"
            };
            format!(r#"<a href="?page={k}" class="{class}" data-page="{k}">{label}</a>"#)
        }
    }
}

pub fn render_html(view: &PageView) -> Vec<u8> {
    let cards: String = view.cards().iter().map(render_card).collect();

    let bar = view.controls();
    let mut previous = String::new();
    let mut pages = String::new();
    let mut next = String::new();
    for control in bar.controls.iter() {
        let rendered = render_control(control);
        match control.kind {
            ControlKind::Previous => previous = rendered,
            ControlKind::Next => next = rendered,
            ControlKind::Page(_) => {
                pages.push_str("      ");
                pages.push_str(&rendered);
                pages.push('\n');
            }
        }
    }
    let nav = format!(
        "    {previous}\n    <div class=\"pagination-buttons\">\n{pages}    </div>\n    {next}\n"
    );

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Personajes</title>
</head>
<body>
  <main class="cards">
{cards}  </main>
  <nav class="buttom">
{nav}  </nav>
</body>
</html>
"#
    );
    html.into_bytes()
}
