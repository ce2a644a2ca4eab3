mod index;
mod switcher;

pub use index::index_page;

use assistant_registry::PageModel;
use maud::{Markup, html};

use crate::config::PageConfig;

// Shared sidebar component
pub fn sidebar(page: &PageConfig, model: &PageModel) -> Markup {
    html! {
        aside class="sidebar" {
            // Header
            div class="brand" {
                h2 { (page.icon) " " (page.title) }
                p class="subtitle" { (page.subtitle) }
            }

            // One button per assistant, in registry order
            nav class="assistant-nav" {
                @for item in &model.navigation {
                    button type="button"
                        class=(if item.active { "nav-button active" } else { "nav-button" })
                        data-assistant=(item.name)
                        title=(item.description)
                        aria-pressed=(if item.active { "true" } else { "false" }) {
                        (item.label)
                    }
                }
            }

            div class="active-assistant" {
                "Active Assistant: "
                span id="active-assistant-label" { (model.active_label) }
            }

            @if !page.features.is_empty() {
                div class="features" {
                    strong { "Features:" }
                    ul {
                        @for feature in &page.features {
                            li { (feature) }
                        }
                    }
                }
            }
        }
    }
}

// Every region is emitted; hidden ones only lose the `active` class.
pub fn content_regions(model: &PageModel) -> Markup {
    html! {
        @for region in &model.regions {
            div class=(if region.visible { "region-container active" } else { "region-container" })
                id=(region.id.as_str())
                data-assistant=(region.assistant)
                aria-hidden=(if region.visible { "false" } else { "true" }) {
                iframe src=(region.url)
                    title=(region.assistant)
                    width="100%"
                    height="100%"
                    frameborder="0"
                    scrolling="yes"
                    allow="clipboard-read; clipboard-write" {}
            }
        }
    }
}

pub const CSS: &str = r#"
    html, body {
        height: 100vh;
        margin: 0;
        padding: 0;
        overflow: hidden;
        font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
        background: #0f0f1e;
    }

    .layout {
        display: flex;
        height: 100vh;
    }

    .sidebar {
        background: #1a1a2e;
        border-right: 2px solid #333;
        width: 280px;
        flex-shrink: 0;
        box-shadow: 4px 0px 10px rgba(0, 0, 0, 0.2);
        padding: 20px 15px;
        box-sizing: border-box;
        overflow-y: auto;
    }

    .brand {
        text-align: center;
        color: white;
        padding: 20px 0;
    }

    .brand h2 {
        color: #fff;
        font-size: 24px;
        margin: 0 0 8px 0;
    }

    .subtitle {
        color: #888;
        font-size: 16px;
        margin: 0;
    }

    .assistant-nav {
        display: flex;
        flex-direction: column;
        margin-bottom: 16px;
    }

    .nav-button {
        width: 100%;
        background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
        color: white;
        border: none;
        border-radius: 8px;
        padding: 12px;
        margin: 6px 0;
        font-weight: 600;
        font-size: 14px;
        text-align: left;
        cursor: pointer;
        box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1);
        transition: transform 0.15s ease;
    }

    .nav-button:hover,
    .nav-button.active {
        background: linear-gradient(135deg, #11998e 0%, #38ef7d 100%);
    }

    .nav-button:hover {
        transform: translateY(-2px);
    }

    .active-assistant {
        background: rgba(255, 255, 255, 0.1);
        padding: 12px;
        border-radius: 8px;
        color: #fff;
        font-weight: 600;
        margin-bottom: 16px;
    }

    .features {
        background: rgba(255, 255, 255, 0.05);
        padding: 15px;
        border-radius: 8px;
        color: #ccc;
    }

    .features ul {
        list-style: none;
        padding: 0;
        margin: 8px 0 0 0;
        line-height: 1.6;
    }

    .content {
        flex: 1;
        min-width: 0;
        padding: 20px 15px;
        box-sizing: border-box;
    }

    .region-container {
        width: 100%;
        height: 100%;
        display: none;
        position: relative;
    }

    .region-container.active {
        display: block;
    }

    iframe {
        border: none;
        border-radius: 8px;
        box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
    }
"#;
