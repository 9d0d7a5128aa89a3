//! Landing page hero section.

use serde::{Deserialize, Serialize};

/// Text of the hero banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub text: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            title: "Vivero Verde ERP".to_string(),
            subtitle: "Frontend y backend de ecommerce para venta de plantas".to_string(),
            text: "Catalogo inicial con plantas de interior, exterior y accesorios.".to_string(),
        }
    }
}

/// Render the hero banner section.
pub fn render_hero(content: &HeroContent) -> String {
    format!(
        r#"<div class="hero" data-section="hero">
    <div class="hero-content">
        <span>
            <h1 class="hero-title">{}</h1>
            <h2 class="hero-subtitle">{}</h2>
        </span>
        <p class="hero-text">{}</p>
    </div>
</div>"#,
        html_escape(&content.title),
        html_escape(&content.subtitle),
        html_escape(&content.text)
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hero() {
        let html = render_hero(&HeroContent::default());
        assert!(html.contains(r#"<h1 class="hero-title">Vivero Verde ERP</h1>"#));
        assert!(html.contains("Frontend y backend de ecommerce para venta de plantas"));
        assert!(html.contains("Catalogo inicial con plantas de interior, exterior y accesorios."));
    }

    #[test]
    fn test_escapes_content() {
        let content = HeroContent {
            title: "Macetas & <b>Sustratos</b>".to_string(),
            ..HeroContent::default()
        };
        let html = render_hero(&content);
        assert!(html.contains("Macetas &amp; &lt;b&gt;Sustratos&lt;/b&gt;"));
    }
}
