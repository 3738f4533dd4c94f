use folio_core::{ContactViewModel, Field, SubmissionStatus};

pub fn render(view: &ContactViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    for field in Field::ALL {
        let value = view.form.get(field);
        let shown = if value.is_empty() { "-" } else { value };
        lines.push(format!("{:<14} {}", field.label(), shown));
        if let Some(error) = view.field_error(field) {
            lines.push(format!("{:<14} ! {}", "", error));
        }
    }

    let captcha = if view.captcha_verified {
        "verified"
    } else {
        "not verified"
    };
    lines.push(format!("{:<14} {}", "Captcha", captcha));

    let button = if view.submit_enabled {
        format!("[ {} ]", view.submit_label())
    } else {
        format!("( {} )", view.submit_label())
    };
    lines.push(button);

    if let Some(message) = &view.status_message {
        let marker = match view.status {
            SubmissionStatus::Success => "ok",
            SubmissionStatus::Error => "error",
            SubmissionStatus::Idle => "info",
        };
        lines.push(format!("[{marker}] {message}"));
    }

    lines
}
