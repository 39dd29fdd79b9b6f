//! Example: inline a small campaign template.

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let css = r#"
        /* shared campaign styles */
        body, p { margin: 0; font-family: Helvetica, Arial, sans-serif; }
        .button { background: #1a73e8; color: #ffffff; padding: 10px 24px; }
        .button:hover { background: #155ab6; }
        table.layout > td { padding: 0; }

        @media (max-width: 600px) {
            .button { display: block; }
        }
    "#;

    let html = r#"<div class="wrap"><p>Your order has shipped.</p><a class="button" href="https://example.com/track">Track package</a><img src="banner.png" alt=""></div>"#;

    let inlined = mailstyle_inline::inline(html, css);
    println!("{inlined}");
}
