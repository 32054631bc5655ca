//! Rendering adapter: turns the declarative menu tree and the
//! missing-report diagnostic into the navbar markup the host page embeds.
//! Pure string construction; the reconciliation side never sees markup.

use shared::domain::{CustomerSummary, MenuGroup, MenuTree, MissingReports};

pub fn render_page(menu: &MenuTree, missing: &MissingReports) -> String {
    let mut out = String::new();
    out.push_str("<ul class=\"navbar-nav\" id=\"navigation\">\n");
    for group in &menu.groups {
        render_group(&mut out, group);
    }
    out.push_str("</ul>\n");
    render_missing(&mut out, missing);
    out
}

fn render_group(out: &mut String, group: &MenuGroup) {
    out.push_str("  <li class=\"nav-item dropdown\">\n");
    out.push_str(&format!(
        "    <a class=\"nav-link dropdown-toggle\" href=\"#\" role=\"button\" data-toggle=\"dropdown\" aria-expanded=\"false\">{}</a>\n",
        escape_html(&group.label)
    ));
    out.push_str("    <ul class=\"dropdown-menu\">\n");
    for customer in &group.customers {
        render_customer(out, customer);
    }
    out.push_str("    </ul>\n");
    out.push_str("  </li>\n");
}

fn render_customer(out: &mut String, summary: &CustomerSummary) {
    out.push_str("      <li>\n");
    out.push_str(&format!(
        "        <div class=\"dropdown-item\">{}</div>\n",
        escape_html(&summary.customer_name)
    ));
    out.push_str("        <ul class=\"submenu dropdown-menu\">\n");
    for entry in &summary.programs {
        // A program without a matching report renders as a dead item.
        match &entry.report_link {
            Some(link) => out.push_str(&format!(
                "          <li><a class=\"dropdown-item\" href=\"{}\">{}</a></li>\n",
                escape_html(link),
                escape_html(&entry.report_name)
            )),
            None => out.push_str(&format!(
                "          <li><a class=\"dropdown-item\">{}</a></li>\n",
                escape_html(&entry.report_name)
            )),
        }
    }
    out.push_str("        </ul>\n");
    out.push_str("      </li>\n");
}

fn render_missing(out: &mut String, missing: &MissingReports) {
    out.push_str("<div id=\"missing\">\n");
    for name in &missing.names {
        out.push_str(&format!("  <p>{}: Make/Edit Report</p>\n", escape_html(name)));
    }
    out.push_str(&format!(
        "  <p>Number of Missing Reports: {}</p>\n",
        missing.count
    ));
    out.push_str("</div>\n");
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
