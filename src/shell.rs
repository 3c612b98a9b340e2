//! Presentation shell: the static landing page that hosts the hero scene.
//!
//! The page is rendered from a [`PageContent`] value into one self-contained
//! HTML document. It holds no state; the only dynamic part is the canvas
//! region, which the wasm build of the viewer attaches to on load.

/// Id of the canvas the hero scene renders into
pub const SCENE_CANVAS_ID: &str = "hero-scene";

/// File name the shell is written to inside the client directory
pub const ENTRY_DOCUMENT: &str = "index.html";

const STAR_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="currentColor" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><polygon points="12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2"/></svg>"#;

const MENU_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><line x1="4" x2="20" y1="12" y2="12"/><line x1="4" x2="20" y1="6" y2="6"/><line x1="4" x2="20" y1="18" y2="18"/></svg>"#;

const ARROW_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M5 12h14"/><path d="m12 5 7 7-7 7"/></svg>"#;

const STYLESHEET: &str = r#"
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
body{font-family:ui-sans-serif,system-ui,-apple-system,"Segoe UI",Roboto,sans-serif;-webkit-font-smoothing:antialiased}
button{font:inherit;cursor:pointer;border:0;background:none}
ul{list-style:none}
svg{display:block}
::selection{background:#ffedd5}
.page{min-height:100vh;background:#f9fafb;color:#111827;display:flex;flex-direction:column;overflow:hidden}
.nav{display:flex;align-items:center;justify-content:space-between;padding:1.5rem;max-width:80rem;margin:0 auto;width:100%}
.brand{display:flex;align-items:center;gap:.5rem;font-weight:700;font-size:1.25rem;letter-spacing:-.05em}
.brand-badge{width:2rem;height:2rem;background:#f97316;border-radius:9999px;display:flex;align-items:center;justify-content:center;color:#fff}
.brand-badge svg{width:16px;height:16px}
.accent{color:#f97316}
.nav-menu{display:none;align-items:center;gap:2rem;font-weight:500;color:#4b5563;font-size:.875rem}
.nav-menu li{cursor:pointer;transition:color .15s}
.nav-menu li:hover{color:#000}
.nav-actions{display:flex;align-items:center;gap:1rem}
.contact{display:none;padding:.625rem 1.25rem;font-size:.875rem;font-weight:600;color:#fff;background:#000;border-radius:9999px;box-shadow:0 10px 15px -3px rgba(0,0,0,.1);transition:all .3s}
.contact:hover{background:#1f2937;box-shadow:0 20px 25px -5px rgba(0,0,0,.1)}
.menu-toggle{padding:.5rem;color:#4b5563}
.menu-toggle svg{width:24px;height:24px}
.hero{flex-grow:1;display:flex;flex-direction:column;align-items:center;justify-content:center;max-width:80rem;margin:0 auto;width:100%;padding:3rem 1.5rem;gap:3rem}
.content{width:100%;display:flex;flex-direction:column;align-items:flex-start;z-index:10}
.content>*+*{margin-top:2rem}
.tags{display:flex;flex-wrap:wrap;gap:.75rem;animation:fade-in-up .6s ease-out both}
.tag{padding:.25rem .75rem;background:#fff;border:1px solid #e5e7eb;border-radius:9999px;font-size:10px;font-weight:700;text-transform:uppercase;letter-spacing:.1em;color:#6b7280;box-shadow:0 1px 2px rgba(0,0,0,.05)}
h1{font-size:3rem;font-weight:800;line-height:1.1;letter-spacing:-.025em}
.highlight{position:relative;display:inline-block}
.highlight-star{position:absolute;top:-1.5rem;right:-2rem;color:#f97316;animation:pulse 2s cubic-bezier(.4,0,.6,1) infinite}
.highlight-star svg{width:40px;height:40px}
.gradient{color:transparent;background:linear-gradient(to right,#f97316,#f59e0b);-webkit-background-clip:text;background-clip:text}
.tagline{font-size:1.125rem;color:#4b5563;max-width:28rem;line-height:1.625}
.ctas{display:flex;flex-direction:column;gap:1rem;width:100%;padding-top:1rem}
.cta{display:flex;align-items:center;justify-content:center;gap:.5rem;padding:1rem 2rem;border-radius:9999px;font-weight:600;font-size:.875rem;transition:all .3s}
.cta-primary{background:#000;color:#fff}
.cta-primary:hover{transform:scale(1.05);box-shadow:0 25px 50px -12px rgba(0,0,0,.25)}
.cta-primary svg{width:1rem;height:1rem;transition:transform .15s}
.cta-primary:hover svg{transform:translateX(.25rem)}
.cta-secondary{background:#fff;color:#000;border:1px solid #e5e7eb}
.cta-secondary:hover{background:#f9fafb;border-color:#d1d5db}
.social{padding-top:2rem;display:flex;align-items:center;gap:1rem;font-size:.75rem;font-weight:500;color:#9ca3af}
.avatars{display:flex}
.avatar{width:2rem;height:2rem;border-radius:9999px;background:#e5e7eb;border:2px solid #fff}
.avatar+.avatar{margin-left:-.5rem}
.scene{width:100%;height:400px;position:relative}
.scene-glow{position:absolute;top:50%;left:50%;transform:translate(-50%,-50%);width:300px;height:300px;background:rgba(251,146,60,.2);border-radius:9999px;filter:blur(64px);pointer-events:none}
.scene canvas{position:relative;width:100%;height:100%;display:block;touch-action:none;cursor:grab}
.scene canvas:active{cursor:grabbing}
.scene-poster{position:absolute;inset:0;width:100%;height:100%;object-fit:contain}
@keyframes pulse{50%{opacity:.5}}
@keyframes fade-in-up{from{opacity:0;transform:translateY(1rem)}to{opacity:1;transform:none}}
@media (min-width:640px){.ctas{flex-direction:row;width:auto}}
@media (min-width:768px){
.nav{padding:1.5rem 3rem}
.nav-menu{display:flex}
.contact{display:block}
.menu-toggle{display:none}
.hero{padding:3rem}
.tag{font-size:.75rem}
h1{font-size:3.75rem}
}
@media (min-width:1024px){
.hero{flex-direction:row;padding-top:0;padding-bottom:0;gap:0}
.content{width:50%}
.scene{width:50%;height:600px}
h1{font-size:4.5rem}
}
"#;

/// The hero heading, split where the page styles it differently
#[derive(Debug, Clone)]
pub struct Heading {
    /// First line
    pub lead: String,
    /// Word decorated with the pulsing star
    pub highlight: String,
    /// Words following the highlight on the second line
    pub connector: String,
    /// Last line, rendered as gradient text
    pub gradient: String,
}

/// Everything the landing page displays
#[derive(Debug, Clone)]
pub struct PageContent {
    pub title: String,
    pub description: String,
    pub brand: String,
    pub brand_accent: String,
    pub nav_items: Vec<String>,
    pub contact_label: String,
    pub tags: Vec<String>,
    pub heading: Heading,
    pub tagline: String,
    pub primary_cta: String,
    pub secondary_cta: String,
    pub avatar_count: usize,
    pub social_proof: String,
    /// Module that boots the scene viewer on the canvas
    pub scene_script: String,
    /// Still image shown when scripts are disabled
    pub poster: Option<String>,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            title: "ASTRA.IO: Build the Future of Digital Creativity".to_string(),
            description: "Unleash your brand's potential with our next-gen design engine."
                .to_string(),
            brand: "ASTRA".to_string(),
            brand_accent: ".IO".to_string(),
            nav_items: ["Products", "Solutions", "Pricing", "Company"]
                .map(String::from)
                .to_vec(),
            contact_label: "Let's talk".to_string(),
            tags: ["Version 2.0", "Now Live"].map(String::from).to_vec(),
            heading: Heading {
                lead: "Build the".to_string(),
                highlight: "Future".to_string(),
                connector: "of".to_string(),
                gradient: "Digital Creativity".to_string(),
            },
            tagline: "Unleash your brand's potential with our next-gen design engine. \
                      Beautiful, fast, and accessible."
                .to_string(),
            primary_cta: "Start Building".to_string(),
            secondary_cta: "View Showreel".to_string(),
            avatar_count: 3,
            social_proof: "Trusted by 10,000+ designers".to_string(),
            scene_script: "./pkg/astra.js".to_string(),
            poster: None,
        }
    }
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Quote text as a JavaScript string literal that is safe inside <script>
fn js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '<' => out.push_str("\\u003c"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn nav_bar(content: &PageContent) -> String {
    let items: String = content
        .nav_items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect();

    format!(
        r#"<nav class="nav">
  <div class="brand">
    <div class="brand-badge">{star}</div>
    <span>{brand}<span class="accent">{accent}</span></span>
  </div>
  <ul class="nav-menu">{items}</ul>
  <div class="nav-actions">
    <button class="contact">{contact}</button>
    <button class="menu-toggle" aria-label="Open menu">{menu}</button>
  </div>
</nav>"#,
        star = STAR_ICON,
        brand = escape_html(&content.brand),
        accent = escape_html(&content.brand_accent),
        items = items,
        contact = escape_html(&content.contact_label),
        menu = MENU_ICON,
    )
}

fn content_column(content: &PageContent) -> String {
    let tags: String = content
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape_html(tag)))
        .collect();
    let avatars = r#"<div class="avatar"></div>"#.repeat(content.avatar_count);
    let heading = &content.heading;

    format!(
        r#"<div class="content">
    <div class="tags">{tags}</div>
    <h1>{lead} <br>
      <span class="highlight"><span class="highlight-star">{star}</span>{highlight}</span> {connector} <br>
      <span class="gradient">{gradient}</span>
    </h1>
    <p class="tagline">{tagline}</p>
    <div class="ctas">
      <button class="cta cta-primary">{primary}{arrow}</button>
      <button class="cta cta-secondary">{secondary}</button>
    </div>
    <div class="social">
      <div class="avatars">{avatars}</div>
      <p>{social}</p>
    </div>
  </div>"#,
        tags = tags,
        lead = escape_html(&heading.lead),
        star = STAR_ICON,
        highlight = escape_html(&heading.highlight),
        connector = escape_html(&heading.connector),
        gradient = escape_html(&heading.gradient),
        tagline = escape_html(&content.tagline),
        primary = escape_html(&content.primary_cta),
        arrow = ARROW_ICON,
        secondary = escape_html(&content.secondary_cta),
        avatars = avatars,
        social = escape_html(&content.social_proof),
    )
}

fn scene_region(content: &PageContent) -> String {
    let poster = content
        .poster
        .as_deref()
        .map(|src| {
            format!(
                r#"<noscript><img class="scene-poster" src="{}" alt=""></noscript>"#,
                escape_html(src)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="scene">
    <div class="scene-glow"></div>
    <canvas id="{id}"></canvas>
    {poster}
  </div>"#,
        id = SCENE_CANVAS_ID,
        poster = poster,
    )
}

/// Render the complete landing page
pub fn render_page(content: &PageContent) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{description}">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<div class="page">
{nav}
<main class="hero">
  {content}
  {scene}
</main>
</div>
<script type="module">
import init from {script};
init().catch((error) => console.error("hero scene failed to start", error));
</script>
</body>
</html>
"#,
        description = escape_html(&content.description),
        title = escape_html(&content.title),
        style = STYLESHEET,
        nav = nav_bar(content),
        content = content_column(content),
        scene = scene_region(content),
        script = js_string(&content.scene_script),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_js_string_cannot_close_script() {
        assert_eq!(js_string("./pkg/astra.js"), "\"./pkg/astra.js\"");
        let quoted = js_string("</script><script>\"");
        assert!(!quoted.contains("</script>"));
        assert!(quoted.ends_with("\\\"\""));
    }

    #[test]
    fn test_page_contains_all_content() {
        let content = PageContent::default();
        let page = render_page(&content);

        assert!(page.starts_with("<!DOCTYPE html>"));
        for item in &content.nav_items {
            assert!(page.contains(&format!("<li>{}</li>", item)));
        }
        for tag in &content.tags {
            assert!(page.contains(tag.as_str()));
        }
        assert!(page.contains("Let&#39;s talk"));
        assert!(page.contains("Build the"));
        assert!(page.contains("Future"));
        assert!(page.contains("Digital Creativity"));
        assert!(page.contains("Start Building"));
        assert!(page.contains("View Showreel"));
        assert!(page.contains("Trusted by 10,000+ designers"));
        assert!(page.contains(r#"ASTRA<span class="accent">.IO</span>"#));
        assert_eq!(page.matches(r#"<div class="avatar"></div>"#).count(), 3);
    }

    #[test]
    fn test_page_embeds_scene_canvas() {
        let page = render_page(&PageContent::default());
        assert_eq!(page.matches(r#"<canvas id="hero-scene">"#).count(), 1);
        assert!(page.contains(r#"import init from "./pkg/astra.js";"#));
        assert!(!page.contains("<noscript>"));
    }

    #[test]
    fn test_poster_fallback() {
        let content = PageContent {
            poster: Some("hero.png".to_string()),
            ..PageContent::default()
        };
        let page = render_page(&content);
        assert!(page.contains(r#"<noscript><img class="scene-poster" src="hero.png" alt=""></noscript>"#));
    }

    #[test]
    fn test_content_is_escaped() {
        let content = PageContent {
            nav_items: vec!["<script>alert(1)</script>".to_string()],
            ..PageContent::default()
        };
        let page = render_page(&content);
        assert!(page.contains("<li>&lt;script&gt;alert(1)&lt;/script&gt;</li>"));
        assert!(!page.contains("<li><script>"));
    }

    #[test]
    fn test_rendering_is_pure() {
        let content = PageContent::default();
        assert_eq!(render_page(&content), render_page(&content));
    }
}
