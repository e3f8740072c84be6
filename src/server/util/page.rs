/// Renders the minimal HTML page shown at the end of a verification redirect.
///
/// `title` and `message` are escaped before being placed in the document.
pub fn render_page(title: &str, message: &str) -> String {
    let title = escape_html(title);
    let message = escape_html(message);

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>body{{font-family:sans-serif;background:#1e1f22;color:#f2f3f5;\
         display:flex;align-items:center;justify-content:center;height:100vh;margin:0}}\
         main{{max-width:32rem;text-align:center}}</style></head>\
         <body><main><h1>{title}</h1><p>{message}</p></main></body></html>"
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
