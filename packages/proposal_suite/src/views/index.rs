use assistant_registry::render_page;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use axum_extra::extract::cookie::CookieJar;
use maud::{DOCTYPE, PreEscaped, html};

use super::{CSS, switcher};
use crate::AppState;
use crate::handlers::open_session;

fn favicon(icon: &str) -> String {
    format!(
        "data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>{icon}</text></svg>"
    )
}

pub async fn index_page(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, session) = open_session(&state, jar).await;
    let model = render_page(&state.registry, &session.selection);
    state.metrics.page_rendered();

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (state.page.title) }
                meta name="viewport" content="width=device-width, initial-scale=1";
                link rel="icon" href=(favicon(&state.page.icon));
                style { (PreEscaped(CSS)) }
            }
            body {
                div class="layout" {
                    (super::sidebar(&state.page, &model))

                    main class="content" id="content" {
                        (super::content_regions(&model))
                    }
                }
                script { (PreEscaped(switcher::JAVASCRIPT)) }
            }
        }
    };

    (jar, Html(markup.into_string()))
}
