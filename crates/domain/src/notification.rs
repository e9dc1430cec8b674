use crate::Reminder;

const EMAIL_SUBJECT: &str = "Reminder Notification";

/// Content of the email notification for a `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub recipient: String,
    pub subject: String,
    pub plain_body: String,
    pub html_body: String,
}

impl EmailMessage {
    pub fn for_reminder(reminder: &Reminder) -> Self {
        let plain_body = format!(
            "Hello {},\n\nThis is your scheduled reminder:\n\n{}\n\nBest regards,\nReminder Scheduler",
            reminder.full_name, reminder.custom_message
        );
        let html_body = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #2563eb;">{subject}</h2>
  <p>Hello <strong>{name}</strong>,</p>
  <p>This is your scheduled reminder:</p>
  <div style="background-color: #f3f4f6; padding: 15px; border-radius: 5px; margin: 20px 0;">
    <p style="margin: 0; font-style: italic;">{message}</p>
  </div>
  <p>Best regards,<br>Reminder Scheduler</p>
</div>"#,
            subject = EMAIL_SUBJECT,
            name = escape_html(&reminder.full_name),
            message = escape_html(&reminder.custom_message),
        );

        Self {
            recipient: reminder.email.clone(),
            subject: EMAIL_SUBJECT.into(),
            plain_body,
            html_body,
        }
    }
}

/// Content of the SMS notification for a `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub struct SmsMessage {
    pub recipient: String,
    pub body: String,
}

impl SmsMessage {
    pub fn for_reminder(reminder: &Reminder) -> Self {
        Self {
            recipient: reminder.phone_number.clone(),
            body: format!(
                "Reminder for {}: {}",
                reminder.full_name, reminder.custom_message
            ),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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
