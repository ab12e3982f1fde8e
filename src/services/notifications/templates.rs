//! Transactional email templates for appointment notifications.
//!
//! One pure render function per intent. Each takes a typed view-model and
//! returns a [`RenderedEmail`], keeping rendering independently testable
//! from data-fetching and mail dispatch. The HTML is self-contained (inline
//! styles only) so it can be handed directly to the mail API.
//!
//! All copy is French; subjects carry the establishment name.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::AppointmentDetails;
use crate::services::notifications::format::{format_date_full, format_price, format_time_range};

// Accent colors per intent family.
const ACCENT_NEUTRAL: &str = "#1f1b16";
const ACCENT_CONFIRM: &str = "#16a34a";
const ACCENT_CANCEL: &str = "#dc2626";
const ACCENT_MODIFY: &str = "#d97706";

/// A rendered email, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

// ============================================================================
// View model
// ============================================================================

/// Display-ready snapshot of one appointment.
///
/// All formatting decisions (date/time/price rendering, name and service
/// fallbacks) happen when the view is built; the render functions only
/// assemble strings.
#[derive(Debug, Clone)]
pub struct AppointmentView {
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_instagram: Option<String>,
    pub establishment_name: String,
    pub establishment_email: Option<String>,
    pub establishment_phone: Option<String>,
    pub service_name: String,
    pub date: String,
    pub time_range: String,
    pub price: String,
    pub notes: Option<String>,
}

impl AppointmentView {
    /// Builds the view from a store snapshot, applying the documented
    /// fallback rules.
    pub fn from_details(details: &AppointmentDetails) -> Self {
        Self {
            client_name: details.client_display_name(),
            client_email: details.client_email().map(String::from),
            client_phone: details.appointment.client_phone.clone(),
            client_instagram: details.appointment.client_instagram.clone(),
            establishment_name: details.establishment.name.clone(),
            establishment_email: details.establishment.email.clone(),
            establishment_phone: details.establishment.phone.clone(),
            service_name: details.service_name().to_string(),
            date: format_date_full(details.appointment.start_time),
            time_range: format_time_range(
                details.appointment.start_time,
                details.appointment.end_time,
            ),
            price: format_price(details.service_price()),
            notes: details.appointment.notes.clone(),
        }
    }
}

// ============================================================================
// Modification changes
// ============================================================================

/// Before/after pair for a rescheduled date.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateChange {
    pub old_date: String,
    pub new_date: String,
}

/// Before/after pair for a rescheduled time slot.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeChange {
    pub old_time: String,
    pub new_time: String,
}

/// Before/after pair for a swapped service.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceChange {
    pub old_service: String,
    pub new_service: String,
}

/// Structured set of field changes accompanying a modification notice.
///
/// Every field is optional; the rendered changes list carries zero to three
/// entries, in date/time/service order.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentChanges {
    pub date: Option<DateChange>,
    pub time: Option<TimeChange>,
    pub service: Option<ServiceChange>,
}

impl AppointmentChanges {
    /// Renders the changes as `"<Field> : <old> → <new>"` lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(c) = &self.date {
            lines.push(format!("Date : {} → {}", c.old_date, c.new_date));
        }
        if let Some(c) = &self.time {
            lines.push(format!("Heure : {} → {}", c.old_time, c.new_time));
        }
        if let Some(c) = &self.service {
            lines.push(format!("Prestation : {} → {}", c.old_service, c.new_service));
        }
        lines
    }
}

// ============================================================================
// Render functions, one per intent
// ============================================================================

/// New-booking notice sent to the establishment.
///
/// Surfaces the contact details the client entered at booking time so the
/// establishment can reach out without opening the dashboard.
pub fn booking_created_notice(view: &AppointmentView) -> RenderedEmail {
    let mut body = String::new();
    body.push_str("<p>Bonjour,</p>");
    body.push_str(&format!(
        "<p>Vous avez reçu une nouvelle réservation de <strong>{}</strong>.</p>",
        view.client_name
    ));
    body.push_str(&details_block(view));
    body.push_str(&client_contact_block(view));
    if let Some(notes) = &view.notes {
        body.push_str(&format!(
            "<p><strong>Notes du client :</strong> {}</p>",
            notes
        ));
    }
    body.push_str(
        "<p>Retrouvez tous vos rendez-vous depuis votre tableau de bord GlowPlan.</p>",
    );

    RenderedEmail {
        subject: format!("Nouvelle réservation - {}", view.establishment_name),
        html: layout(ACCENT_NEUTRAL, "Nouvelle réservation", &body),
    }
}

/// Booking confirmation sent to the client.
///
/// Used both by the explicit confirmation intent and by the auto-confirm
/// branch of the new-booking flow.
pub fn booking_confirmation(view: &AppointmentView) -> RenderedEmail {
    let mut body = String::new();
    body.push_str(&format!("<p>Bonjour {},</p>", view.client_name));
    body.push_str(&format!(
        "<p>Votre rendez-vous chez <strong>{}</strong> est confirmé. Nous avons hâte de vous accueillir !</p>",
        view.establishment_name
    ));
    body.push_str(&details_block(view));
    if let Some(notes) = &view.notes {
        body.push_str(&format!("<p><strong>Vos notes :</strong> {}</p>", notes));
    }
    body.push_str(&establishment_contact_block(view));

    RenderedEmail {
        subject: format!(
            "Votre rendez-vous est confirmé - {}",
            view.establishment_name
        ),
        html: layout(ACCENT_CONFIRM, "Rendez-vous confirmé", &body),
    }
}

/// Cancellation notice sent to the establishment when the client cancels.
pub fn client_cancellation_notice(view: &AppointmentView) -> RenderedEmail {
    let mut body = String::new();
    body.push_str("<p>Bonjour,</p>");
    body.push_str(&format!(
        "<p><strong>{}</strong> a annulé son rendez-vous.</p>",
        view.client_name
    ));
    body.push_str(&details_block(view));
    body.push_str("<p>Le créneau est de nouveau disponible à la réservation.</p>");

    RenderedEmail {
        subject: format!("Réservation annulée - {}", view.establishment_name),
        html: layout(ACCENT_CANCEL, "Réservation annulée", &body),
    }
}

/// Cancellation notice sent to the client when the establishment cancels.
pub fn establishment_cancellation(view: &AppointmentView, reason: Option<&str>) -> RenderedEmail {
    let mut body = String::new();
    body.push_str(&format!("<p>Bonjour {},</p>", view.client_name));
    body.push_str(&format!(
        "<p>Nous sommes désolés, <strong>{}</strong> a dû annuler votre rendez-vous.</p>",
        view.establishment_name
    ));
    if let Some(reason) = reason {
        body.push_str(&format!("<p><strong>Motif :</strong> {}</p>", reason));
    }
    body.push_str(&details_block(view));
    body.push_str(
        "<p>Vous pouvez reprendre rendez-vous à tout moment depuis GlowPlan.</p>",
    );
    body.push_str(&establishment_contact_block(view));

    RenderedEmail {
        subject: format!(
            "Votre rendez-vous a été annulé - {}",
            view.establishment_name
        ),
        html: layout(ACCENT_CANCEL, "Rendez-vous annulé", &body),
    }
}

/// Modification notice sent to the client, with the changes list.
pub fn modification_notice(
    view: &AppointmentView,
    changes: &AppointmentChanges,
) -> RenderedEmail {
    let mut body = String::new();
    body.push_str(&format!("<p>Bonjour {},</p>", view.client_name));
    body.push_str(&format!(
        "<p>Votre rendez-vous chez <strong>{}</strong> a été modifié.</p>",
        view.establishment_name
    ));

    let lines = changes.lines();
    if !lines.is_empty() {
        body.push_str("<ul style=\"padding-left:20px;\">");
        for line in &lines {
            body.push_str(&format!("<li style=\"margin:4px 0;\">{}</li>", line));
        }
        body.push_str("</ul>");
    }

    body.push_str("<p>Voici les nouveaux détails de votre rendez-vous :</p>");
    body.push_str(&details_block(view));
    body.push_str(&establishment_contact_block(view));

    RenderedEmail {
        subject: format!(
            "Votre rendez-vous a été modifié - {}",
            view.establishment_name
        ),
        html: layout(ACCENT_MODIFY, "Rendez-vous modifié", &body),
    }
}

// ============================================================================
// Shared building blocks
// ============================================================================

/// Branded outer document: header, content card, footer.
fn layout(accent: &str, heading: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>",
            "<html lang=\"fr\">",
            "<body style=\"margin:0;padding:0;background-color:#f6f4f1;",
            "font-family:Arial,Helvetica,sans-serif;color:#2d2a26;\">",
            "<div style=\"max-width:600px;margin:0 auto;padding:24px;\">",
            "<div style=\"background-color:#1f1b16;border-radius:12px 12px 0 0;",
            "padding:24px;text-align:center;\">",
            "<span style=\"color:#e8b04b;font-size:24px;font-weight:bold;",
            "letter-spacing:1px;\">GlowPlan</span>",
            "</div>",
            "<div style=\"background-color:#ffffff;padding:32px;",
            "border-radius:0 0 12px 12px;\">",
            "<h2 style=\"margin-top:0;color:{accent};\">{heading}</h2>",
            "{body}",
            "</div>",
            "<p style=\"text-align:center;color:#8a857e;font-size:12px;margin-top:16px;\">",
            "Cet email a été envoyé par GlowPlan, votre plateforme de réservation ",
            "beauté &amp; bien-être.",
            "</p>",
            "</div>",
            "</body>",
            "</html>",
        ),
        accent = accent,
        heading = heading,
        body = body,
    )
}

/// Structured details block: establishment, service, date, time, price.
fn details_block(view: &AppointmentView) -> String {
    format!(
        concat!(
            "<div style=\"background-color:#f6f4f1;border-radius:8px;",
            "padding:16px;margin:16px 0;\">",
            "<p style=\"margin:4px 0;\"><strong>Établissement :</strong> {establishment}</p>",
            "<p style=\"margin:4px 0;\"><strong>Prestation :</strong> {service}</p>",
            "<p style=\"margin:4px 0;\"><strong>Date :</strong> {date}</p>",
            "<p style=\"margin:4px 0;\"><strong>Heure :</strong> {time}</p>",
            "<p style=\"margin:4px 0;\"><strong>Prix :</strong> {price}</p>",
            "</div>",
        ),
        establishment = view.establishment_name,
        service = view.service_name,
        date = view.date,
        time = view.time_range,
        price = view.price,
    )
}

/// Contact lines for the client, shown to the establishment.
fn client_contact_block(view: &AppointmentView) -> String {
    let mut block = String::new();
    if let Some(phone) = &view.client_phone {
        block.push_str(&format!(
            "<p style=\"margin:4px 0;\"><strong>Téléphone :</strong> {}</p>",
            phone
        ));
    }
    if let Some(email) = &view.client_email {
        block.push_str(&format!(
            "<p style=\"margin:4px 0;\"><strong>Email :</strong> {}</p>",
            email
        ));
    }
    if let Some(instagram) = &view.client_instagram {
        block.push_str(&format!(
            "<p style=\"margin:4px 0;\"><strong>Instagram :</strong> {}</p>",
            instagram
        ));
    }
    block
}

/// Contact lines for the establishment, shown to the client. Included only
/// when at least one contact channel exists.
fn establishment_contact_block(view: &AppointmentView) -> String {
    let mut channels = Vec::new();
    if let Some(phone) = &view.establishment_phone {
        channels.push(format!("au {}", phone));
    }
    if let Some(email) = &view.establishment_email {
        channels.push(format!("par email à {}", email));
    }
    if channels.is_empty() {
        return String::new();
    }
    format!(
        "<p style=\"color:#8a857e;font-size:14px;\">Une question ? Contactez {} {}.</p>",
        view.establishment_name,
        channels.join(" ou ")
    )
}
