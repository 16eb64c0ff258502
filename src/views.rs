//! Server-rendered pages.
//!
//! Plain string templates; the frontend proper is expected to replace these.
//! Dynamic text is HTML-escaped before interpolation.
use crate::news::{Article, display_date};

pub fn index(notices: &[String]) -> String {
    layout(
        "Newsdesk",
        notices,
        "<h1>Newsdesk</h1>\
         <p>Search the day's headlines, once you are signed in.</p>\
         <p><a href=\"/login\">Login</a> or <a href=\"/register\">Register</a></p>"
            .to_string(),
    )
}

pub fn login(notices: &[String]) -> String {
    layout(
        "Login",
        notices,
        "<h1>Login</h1>\
         <form method=\"post\" action=\"/login\">\
         <label>Email <input type=\"email\" name=\"email\" required></label>\
         <label>Password <input type=\"password\" name=\"password\" required></label>\
         <button type=\"submit\">Login</button>\
         </form>\
         <p>No account? <a href=\"/register\">Register</a></p>"
            .to_string(),
    )
}

pub fn register(notices: &[String]) -> String {
    layout(
        "Register",
        notices,
        "<h1>Register</h1>\
         <form method=\"post\" action=\"/register\">\
         <label>Email <input type=\"email\" name=\"email\" required></label>\
         <label>Password <input type=\"password\" name=\"password\" required></label>\
         <button type=\"submit\">Register</button>\
         </form>"
            .to_string(),
    )
}

pub fn dashboard(notices: &[String], identity: &str) -> String {
    layout(
        "Dashboard",
        notices,
        format!(
            "<h1>Dashboard</h1>\
             <p>Signed in as {}.</p>\
             <form method=\"get\" action=\"/news\">\
             <label>Keyword <input type=\"text\" name=\"keyword\"></label>\
             <button type=\"submit\">Search news</button>\
             </form>\
             <p><a href=\"/logout\">Logout</a></p>",
            escape(identity)
        ),
    )
}

pub fn news(notices: &[String], keyword: &str, articles: &[Article]) -> String {
    let mut body = format!(
        "<h1>News</h1>\
         <form method=\"get\" action=\"/news\">\
         <label>Keyword <input type=\"text\" name=\"keyword\" value=\"{}\"></label>\
         <button type=\"submit\">Search</button>\
         </form>",
        escape(keyword)
    );

    if articles.is_empty() {
        body.push_str("<p>No articles to show.</p>");
    } else {
        body.push_str("<ul class=\"articles\">");
        for article in articles {
            body.push_str(&article_item(article));
        }
        body.push_str("</ul>");
    }

    body.push_str("<p><a href=\"/dashboard\">Back to dashboard</a></p>");

    layout("News", notices, body)
}

fn article_item(article: &Article) -> String {
    let image = article
        .url_to_image
        .as_deref()
        .map(|src| format!("<img src=\"{}\" alt=\"\">", escape(src)))
        .unwrap_or_default();

    format!(
        "<li>{image}\
         <h2><a href=\"{}\">{}</a></h2>\
         <p>{}</p>\
         <p class=\"meta\">{} &mdash; {}</p>\
         </li>",
        escape(&article.url),
        escape(&article.title),
        escape(&article.description),
        escape(&article.source.name),
        // Already normalized; the filter leaves formatted dates untouched.
        escape(&display_date(&article.published_at)),
    )
}

fn layout(title: &str, notices: &[String], body: String) -> String {
    let mut flashes = String::new();
    for notice in notices {
        flashes.push_str(&format!("<p class=\"notice\">{}</p>", escape(notice)));
    }

    format!(
        "<!doctype html>\
         <html lang=\"en\">\
         <head><meta charset=\"utf-8\"><title>{}</title></head>\
         <body>{flashes}{body}</body>\
         </html>",
        escape(title)
    )
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use crate::news::Source;

    use super::*;

    #[test]
    fn notices_render_once_per_entry() {
        let page = index(&["Logged out successfully".to_string()]);
        assert!(page.contains("Logged out successfully"));
    }

    #[test]
    fn article_markup_escapes_content() {
        let article = Article {
            title: "<script>alert(1)</script>".to_string(),
            description: "No description available".to_string(),
            url: "#".to_string(),
            url_to_image: None,
            source: Source {
                name: "Unknown Source".to_string(),
            },
            published_at: "Date unknown".to_string(),
        };

        let page = news(&[], "rust", &[article]);

        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("Date unknown"));
    }
}
