use std::fmt::Write;

use brief_core::{AppViewModel, Mode, PanelStyle, ResultPanel, UploadView};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::constants::*;

const STYLE: &str = "\
body{margin:0;font-family:sans-serif;background:#abdbe3;display:flex;min-height:100vh}\
aside{background:#e48a4b;padding:1.5rem;width:18rem}\
main{flex:1;padding:1.5rem 2.5rem}\
h1,h2{color:#e48a4b}aside h1{color:#fff;font-size:1.3rem}\
textarea,input[type=password]{width:100%;border-radius:12px;padding:.5rem;box-sizing:border-box}\
button{background:#01497c;color:#fff;border:0;border-radius:10px;font-weight:bold;padding:.5rem 1rem;margin-top:.5rem}\
button[disabled]{opacity:.5}\
.panel{border-radius:8px;padding:1rem;margin-top:1rem;white-space:pre-wrap}\
.success{background:#d4edda}.info{background:#d1ecf1}.error{background:#f8d7da}.warning{background:#fff3cd}\
.busy{font-style:italic}";

// Browsers drop one newline right after a `<textarea>` start tag.

/// Renders the whole page for one session.
pub fn render(view: &AppViewModel) -> String {
    let pending = view.busy || view.extracting;
    let mut page = String::with_capacity(4096);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
    if pending {
        let _ = write!(
            page,
            "<meta http-equiv=\"refresh\" content=\"{BUSY_REFRESH_SECS}\">"
        );
    }
    let _ = write!(page, "<title>{PAGE_TITLE}</title><style>{STYLE}</style></head><body>");

    render_sidebar(&mut page, view);

    page.push_str("<main>");
    let _ = write!(page, "<h1>{APP_TITLE}</h1>");
    if view.gate_open {
        render_mode(&mut page, view);
    }
    let _ = write!(page, "<hr><p>{FOOTER}</p></main></body></html>");
    page
}

fn render_sidebar(page: &mut String, view: &AppViewModel) {
    let _ = write!(
        page,
        "<aside><h1>{APP_TITLE}</h1>\
         <form method=\"post\" action=\"{ROUTE_CREDENTIAL}\">\
         <label for=\"{FIELD_KEY}\">{KEY_LABEL}</label>\
         <input type=\"password\" id=\"{FIELD_KEY}\" name=\"{FIELD_KEY}\" autocomplete=\"off\"{placeholder}>\
         <button type=\"submit\">Save key</button></form>",
        placeholder = if view.gate_open {
            format!(" placeholder=\"{KEY_SET_PLACEHOLDER}\"")
        } else {
            String::new()
        },
    );

    if !view.gate_open {
        let _ = write!(page, "<div class=\"panel warning\">{KEY_WARNING}</div></aside>");
        return;
    }

    let disabled = disabled_attr(view.busy);
    let _ = write!(
        page,
        "<form method=\"post\" action=\"{ROUTE_MODE}\"><fieldset><legend>{MODE_LABEL}</legend>"
    );
    for mode in Mode::ALL {
        let checked = if mode == view.mode { " checked" } else { "" };
        let _ = write!(
            page,
            "<label><input type=\"radio\" name=\"{FIELD_MODE}\" value=\"{key}\"{checked}{disabled} \
             onchange=\"this.form.submit()\"> {label}</label><br>",
            key = mode.key(),
            label = mode.label(),
        );
    }
    let _ = write!(
        page,
        "</fieldset><noscript><button type=\"submit\"{disabled}>Select</button></noscript></form></aside>"
    );
}

fn render_mode(page: &mut String, view: &AppViewModel) {
    let mode = view.mode;
    let disabled = disabled_attr(view.busy || view.extracting);
    let _ = write!(page, "<h2>{}</h2>", header(mode));

    match text_field(mode) {
        Some((label, placeholder)) => {
            let _ = write!(
                page,
                "<form method=\"post\" action=\"{ROUTE_SUBMIT}\">\
                 <label for=\"{FIELD_TEXT}\">{label}</label>\
                 <textarea id=\"{FIELD_TEXT}\" name=\"{FIELD_TEXT}\" rows=\"10\" placeholder=\"{placeholder}\">\n{value}</textarea>\
                 <button type=\"submit\"{disabled}>{submit}</button></form>",
                placeholder = attr(placeholder),
                value = text(&view.input_text),
                submit = submit_label(mode),
            );
        }
        None => render_upload(page, view, disabled),
    }

    if view.busy {
        let _ = write!(page, "<p class=\"busy\">{}</p>", busy_label(mode));
    }
    if let Some(panel) = &view.result {
        render_panel(page, panel);
    }
}

fn render_upload(page: &mut String, view: &AppViewModel, disabled: &str) {
    let _ = write!(
        page,
        "<form method=\"post\" action=\"{ROUTE_UPLOAD}\" enctype=\"multipart/form-data\">\
         <label for=\"{FIELD_PDF}\">{UPLOAD_LABEL}</label> \
         <input type=\"file\" id=\"{FIELD_PDF}\" name=\"{FIELD_PDF}\" accept=\"application/pdf,.pdf\">\
         <button type=\"submit\"{disabled}>Upload</button></form>"
    );

    if view.extracting {
        let _ = write!(page, "<p class=\"busy\">{EXTRACTING_NOTICE}</p>");
    }
    if let Some(message) = &view.upload_error {
        let _ = write!(page, "<div class=\"panel error\">{}</div>", text(message));
    }
    if let Some(upload) = &view.upload {
        render_preview(page, upload);
        let _ = write!(
            page,
            "<form method=\"post\" action=\"{ROUTE_SUBMIT}\">\
             <button type=\"submit\"{disabled}>{}</button></form>",
            submit_label(Mode::SummarizePdf)
        );
    }
}

fn render_preview(page: &mut String, upload: &UploadView) {
    let _ = write!(
        page,
        "<p>{name}: {pages} page(s), {chars} characters</p>",
        name = text(&upload.file_name),
        pages = upload.page_count,
        chars = upload.char_count,
    );
    if !upload.failed_pages.is_empty() {
        let pages: Vec<String> = upload.failed_pages.iter().map(u32::to_string).collect();
        let _ = write!(
            page,
            "<div class=\"panel warning\">No text could be extracted from page(s) {}.</div>",
            pages.join(", ")
        );
    }
    let _ = write!(
        page,
        "<label for=\"preview\">{PREVIEW_LABEL}</label>\
         <textarea id=\"preview\" rows=\"15\" readonly>\n{}</textarea>",
        text(&upload.preview)
    );
}

fn render_panel(page: &mut String, panel: &ResultPanel) {
    let class = match panel.style {
        PanelStyle::Success => "success",
        PanelStyle::Info => "info",
        PanelStyle::Error => "error",
    };
    let _ = write!(
        page,
        "<div class=\"panel {class}\">{}</div>",
        text(&panel.text)
    );
}

fn disabled_attr(disabled: bool) -> &'static str {
    if disabled {
        " disabled"
    } else {
        ""
    }
}
