use htmlescape::{encode_attribute, encode_minimal};

/// A one-off message rendered above the form.
pub struct Notice<'a> {
    pub kind: &'a str,
    pub message: &'a str,
}

impl<'a> Notice<'a> {
    pub fn error(message: &'a str) -> Self {
        Self {
            kind: "error",
            message,
        }
    }
}

/// Renders the intake page. Stored submissions are never listed.
pub fn render(notice: Option<Notice<'_>>) -> String {
    let notice_html = match notice {
        Some(notice) => format!(
            r#"<p class="flash flash-{}" role="status">{}</p>"#,
            encode_attribute(notice.kind),
            encode_minimal(notice.message)
        ),
        None => String::new(),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Job Application Form</title>
</head>
<body>
    <h1>Job Application Form</h1>
    {}
    <form method="post" action="/">
        <label for="first_name">First Name</label>
        <input type="text" id="first_name" name="first_name" maxlength="80" required>

        <label for="last_name">Last Name</label>
        <input type="text" id="last_name" name="last_name" maxlength="80" required>

        <label for="email">Email</label>
        <input type="email" id="email" name="email" maxlength="80" required>

        <label for="date">Available Start Date</label>
        <input type="date" id="date" name="date" required>

        <fieldset>
            <legend>Current Occupation</legend>
            <input type="radio" id="employed" name="occupation" value="employed" required>
            <label for="employed">Employed</label>
            <input type="radio" id="unemployed" name="occupation" value="unemployed">
            <label for="unemployed">Unemployed</label>
            <input type="radio" id="self-employed" name="occupation" value="self-employed">
            <label for="self-employed">Self-Employed</label>
            <input type="radio" id="student" name="occupation" value="student">
            <label for="student">Student</label>
        </fieldset>

        <button type="submit">Submit</button>
    </form>
</body>
</html>"#,
        notice_html
    )
}
