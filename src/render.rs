//! Server-rendered HTML for the site pages
//!
//! Plain string templates: the pages are small and static apart from the
//! catalog and the calculator.

use std::fmt::Write;

use crate::{
    catalog::{Catalog, Plan},
    config::ContactConfig,
    contact,
    quote::Quote,
    view::Selection,
};

/// Escape text for HTML element content and quoted attribute values
pub fn escape(text: &str) -> String {
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

fn layout(contact: &ContactConfig, title: &str, body: &str) -> String {
    let brand = escape(&contact.brand);
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · {brand}</title>
</head>
<body>
<nav>
<strong>{brand}</strong>
<a href="/">Home</a>
<a href="/portfolio">Portfolio</a>
<a href="/staff">Staff</a>
</nav>
<main>
{body}
</main>
<footer>© 2026 {brand} Digital</footer>
</body>
</html>
"#,
        title = escape(title),
        brand = brand,
        body = body,
    )
}

/// Company milestones shown on the home page
const JOURNEY: [(&str, &str, &str); 2] = [
    ("2023", "Start", "Identified Instagram DM gap."),
    ("2024", "Launch", "First boutique went live."),
];

fn journey_section() -> String {
    let mut html = String::from("<section id=\"journey\">\n<h2>Our journey</h2>\n<ol>\n");
    for (year, title, description) in JOURNEY {
        let _ = writeln!(
            html,
            "<li><span class=\"year\">{}</span> <strong>{}</strong> {}</li>",
            year,
            escape(title),
            escape(description)
        );
    }
    html.push_str("</ol>\n</section>\n");
    html
}

fn notice_block(notice: Option<&str>) -> String {
    notice
        .map(|n| format!("<p class=\"notice\" role=\"status\">{}</p>\n", escape(n)))
        .unwrap_or_default()
}

fn plan_card(plan: &Plan, contact: &ContactConfig) -> String {
    let mut card = String::new();
    let class = if plan.recommended { "plan recommended" } else { "plan" };
    let _ = writeln!(card, "<article class=\"{}\" id=\"plan-{}\">", class, escape(&plan.id));
    let _ = writeln!(card, "<h3>{}</h3>", escape(&plan.name));

    if plan.is_custom {
        let link = contact::whatsapp_link(
            &contact.whatsapp_number,
            &format!("Hi! I'd like to discuss a {} plan.", plan.name),
        );
        let _ = writeln!(card, "<p class=\"price\">Let's talk</p>");
        let _ = writeln!(card, "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">Contact us</a>", escape(&link));
    } else {
        let _ = writeln!(card, "<p class=\"price\">₹{}</p>", plan.price);
    }

    if !plan.description.is_empty() {
        let _ = writeln!(card, "<p>{}</p>", escape(&plan.description));
    }
    card.push_str("<ul>\n");
    for feature in &plan.features {
        let _ = writeln!(card, "<li>{}</li>", escape(feature));
    }
    card.push_str("</ul>\n</article>\n");
    card
}

fn calculator(catalog: &Catalog, priced: Option<&(Selection, Quote)>, contact: &ContactConfig) -> String {
    let Some((selection, quote)) = priced else {
        return "<section id=\"calculator\"><p>Message us for a quote.</p></section>\n".to_string();
    };

    let mut html = String::from("<section id=\"calculator\">\n<h2>Price calculator</h2>\n<form method=\"get\" action=\"/\">\n<fieldset><legend>Plan</legend>\n");
    for plan in catalog.selectable_plans() {
        let checked = if plan.id == selection.plan_id { " checked" } else { "" };
        let _ = writeln!(
            html,
            "<label><input type=\"radio\" name=\"plan\" value=\"{}\"{}> {} (₹{})</label>",
            escape(&plan.id),
            checked,
            escape(&plan.name),
            plan.price
        );
    }
    html.push_str("</fieldset>\n<fieldset><legend>Add-ons</legend>\n");
    for add_on in &catalog.add_ons {
        let checked = if selection.add_on_ids.contains(&add_on.id) { " checked" } else { "" };
        let disabled = if add_on.is_allowed_for(&selection.plan_id) { "" } else { " disabled" };
        let _ = writeln!(
            html,
            "<label><input type=\"checkbox\" name=\"addon\" value=\"{}\"{}{}> {} (+₹{})</label>",
            escape(&add_on.id),
            checked,
            disabled,
            escape(&add_on.name),
            add_on.price
        );
    }
    html.push_str("</fieldset>\n<button type=\"submit\">Update estimate</button>\n</form>\n");

    html.push_str("<table class=\"estimate\">\n");
    let _ = writeln!(html, "<tr><td>{}</td><td>₹{}</td></tr>", escape(&quote.plan_line.name), quote.plan_line.price);
    for line in &quote.add_on_lines {
        let _ = writeln!(html, "<tr><td>{}</td><td>₹{}</td></tr>", escape(&line.name), line.price);
    }
    if quote.discount > 0 {
        let _ = writeln!(html, "<tr><td>Discount</td><td>−₹{}</td></tr>", quote.discount);
    }
    let _ = writeln!(html, "<tr><th>Total</th><th>₹{}</th></tr>", quote.total);
    html.push_str("</table>\n");

    let link = contact::quote_link(&contact.whatsapp_number, quote);
    let _ = writeln!(
        html,
        "<a class=\"cta\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Send on WhatsApp</a>",
        escape(&link)
    );
    html.push_str("</section>\n");
    html
}

pub fn home_page(catalog: &Catalog, priced: Option<&(Selection, Quote)>, contact: &ContactConfig) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape(&contact.brand));
    body.push_str("<p>Premium Shopify setups for Indian clothing brands.</p>\n");
    let _ = writeln!(
        body,
        "<a class=\"cta\" href=\"{}\" target=\"_blank\" rel=\"noopener\">WhatsApp Inquiry</a>",
        escape(&contact::whatsapp_link(&contact.whatsapp_number, ""))
    );

    body.push_str("<section id=\"plans\">\n");
    for plan in &catalog.plans {
        body.push_str(&plan_card(plan, contact));
    }
    body.push_str("</section>\n");
    body.push_str(&calculator(catalog, priced, contact));
    body.push_str(&journey_section());

    layout(contact, "Shopify setups for boutiques", &body)
}

pub fn portfolio_page(catalog: &Catalog, contact: &ContactConfig) -> String {
    let mut body = String::from("<h1>Portfolio</h1>\n<section id=\"portfolio\">\n");
    for demo in &catalog.demos {
        let _ = writeln!(body, "<article class=\"demo\" id=\"demo-{}\">", escape(&demo.id));
        if let Some(image) = &demo.image {
            let _ = writeln!(body, "<img src=\"{}\" alt=\"{}\">", escape(image), escape(&demo.name));
        }
        let _ = writeln!(body, "<h3>{}</h3>", escape(&demo.name));
        if !demo.category.is_empty() {
            let _ = writeln!(body, "<p class=\"category\">{}</p>", escape(&demo.category));
        }
        let _ = writeln!(body, "<p>{}</p>", escape(&demo.description));
        if let Some(url) = &demo.url {
            let _ = writeln!(body, "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">Visit store</a>", escape(url));
        }
        body.push_str("</article>\n");
    }
    body.push_str("</section>\n");
    layout(contact, "Portfolio", &body)
}

pub fn login_page(contact: &ContactConfig, notice: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Staff login</h1>
{notice}<form method="post" action="/staff">
<input type="password" name="password" placeholder="Password" autocomplete="current-password">
<button type="submit">Unlock</button>
</form>
"#,
        notice = notice_block(notice),
    );
    layout(contact, "Staff login", &body)
}

/// Plan editor. The password travels in a hidden field: the gate is a
/// screen-lock with no session.
pub fn editor_page(catalog: &Catalog, contact: &ContactConfig, password: &str, notice: Option<&str>) -> String {
    let mut body = String::from("<h1>Plan editor</h1>\n");
    body.push_str(&notice_block(notice));

    for plan in &catalog.plans {
        let _ = write!(
            body,
            r#"<form method="post" action="/staff/plans/{id}" class="plan-editor">
<input type="hidden" name="password" value="{password}">
<h3>{id}</h3>
<label>Name <input name="name" value="{name}"></label>
<label>Price <input name="price" inputmode="numeric" value="{price}"></label>
<label>Description <textarea name="description">{description}</textarea></label>
<button type="submit">Save</button>
</form>
"#,
            id = escape(&plan.id),
            password = escape(password),
            name = escape(&plan.name),
            price = plan.price,
            description = escape(&plan.description),
        );
    }

    body.push_str("<form method=\"get\" action=\"/\"><button type=\"submit\">Logout</button></form>\n");
    layout(contact, "Plan editor", &body)
}
