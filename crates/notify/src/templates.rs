//! HTML bodies for order and lead notifications.
//!
//! Every user-provided string passes through [`escape_html`] before it is
//! interpolated.

use dealership_core::cart::Cart;
use dealership_core::error::CoreError;
use dealership_core::pricing::format_eur;

use crate::mailer::EmailMessage;

/// Customer details attached to an order.
#[derive(Debug, Clone)]
pub struct OrderContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
}

/// A contact-form submission, flattened for the merchant notification.
#[derive(Debug, Clone)]
pub struct LeadContact {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    /// Human-readable title of the vehicle the lead asked about.
    pub vehicle: Option<String>,
    pub interest: Option<String>,
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn lines_table(cart: &Cart) -> Result<String, CoreError> {
    let mut rows = String::new();
    for line in cart.lines() {
        rows.push_str(&format!(
            "<tr><td>{}</td><td style=\"text-align:center\">{}</td>\
             <td style=\"text-align:right\">{}</td></tr>",
            escape_html(&line.title),
            line.quantity,
            format_eur(line.line_total_cents()?),
        ));
    }
    Ok(format!(
        "<table style=\"width:100%;border-collapse:collapse\">\
         <thead><tr><th align=\"left\">Article</th><th>Qty</th><th align=\"right\">Total</th></tr></thead>\
         <tbody>{rows}</tbody>\
         <tfoot><tr><td colspan=\"2\"><strong>Subtotal</strong></td>\
         <td style=\"text-align:right\"><strong>{}</strong></td></tr></tfoot>\
         </table>",
        format_eur(cart.subtotal_cents()?),
    ))
}

fn message_block(message: Option<&str>) -> String {
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => format!(
            "<h3>Message</h3><p style=\"white-space:pre-line\">{}</p>",
            escape_html(m)
        ),
        None => String::new(),
    }
}

/// Order notification for the dealership. Replies go to the customer.
///
/// Fails when the cart totals are out of range.
pub fn order_merchant_notification(
    merchant_email: &str,
    customer: &OrderContact,
    cart: &Cart,
    message: Option<&str>,
) -> Result<EmailMessage, CoreError> {
    let address = customer
        .address
        .as_deref()
        .map(|a| format!("<li>Address: {}</li>", escape_html(a)))
        .unwrap_or_default();

    let html = format!(
        "<h2>New order from {name}</h2>\
         <ul><li>Email: {email}</li><li>Phone: {phone}</li>{address}</ul>\
         {table}{message}",
        name = escape_html(&customer.name),
        email = escape_html(&customer.email),
        phone = escape_html(&customer.phone),
        table = lines_table(cart)?,
        message = message_block(message),
    );

    Ok(EmailMessage {
        to: vec![merchant_email.to_string()],
        subject: format!(
            "New order: {} item(s), {}",
            cart.item_count(),
            format_eur(cart.subtotal_cents()?)
        ),
        html,
        reply_to: Some(customer.email.clone()),
    })
}

/// Order confirmation for the customer. Replies go to the dealership.
///
/// `site_url` is the public storefront origin used for the link back to the
/// gear catalogue.
pub fn order_customer_confirmation(
    merchant_email: &str,
    site_url: &str,
    customer: &OrderContact,
    cart: &Cart,
) -> Result<EmailMessage, CoreError> {
    let html = format!(
        "<h2>Thank you, {name}</h2>\
         <p>We have received your order and will contact you shortly to confirm \
         availability and arrange payment in store.</p>\
         {table}\
         <p><a href=\"{shop}\">Continue shopping</a></p>",
        name = escape_html(&customer.name),
        table = lines_table(cart)?,
        shop = escape_html(&format!("{}/gear", site_url.trim_end_matches('/'))),
    );

    Ok(EmailMessage {
        to: vec![customer.email.clone()],
        subject: "Your order has been received".to_string(),
        html,
        reply_to: Some(merchant_email.to_string()),
    })
}

/// New-lead notification for the dealership.
pub fn lead_notification(merchant_email: &str, lead: &LeadContact) -> EmailMessage {
    let optional = |label: &str, value: Option<&str>| {
        value
            .map(|v| format!("<li>{label}: {}</li>", escape_html(v)))
            .unwrap_or_default()
    };

    let html = format!(
        "<h2>New contact request from {name}</h2>\
         <ul><li>Email: {email}</li>{phone}{vehicle}{interest}</ul>\
         {message}",
        name = escape_html(&lead.full_name),
        email = escape_html(&lead.email),
        phone = optional("Phone", lead.phone.as_deref()),
        vehicle = optional("Vehicle", lead.vehicle.as_deref()),
        interest = optional("Interest", lead.interest.as_deref()),
        message = message_block(Some(&lead.message)),
    );

    let subject = match lead.subject.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => format!("Contact: {s}"),
        _ => format!("Contact request from {}", lead.full_name),
    };

    EmailMessage {
        to: vec![merchant_email.to_string()],
        subject,
        html,
        reply_to: Some(lead.email.clone()),
    }
}
