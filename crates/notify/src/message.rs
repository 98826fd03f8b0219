use salonbook_core::models::{booking::Booking, service::Service, user::User};

/// Text sent to the salon when a client reserves a slot.
///
/// Uses WhatsApp markup: `*bold*` and `_italic_`.
pub fn compose_booking_message(booking: &Booking, client: &User, service: &Service) -> String {
    format!(
        "*NEW BOOKING* 💅✨\n\n\
         👤 *Client:* {}\n\
         📞 *WhatsApp:* {}\n\
         💅 *Service:* {}\n\
         📅 *Date:* {}\n\
         ⏰ *Time:* {}\n\
         🔖 *Reference:* {}\n\n\
         _Message generated automatically._",
        client.name,
        client.phone,
        service.name,
        booking.date.format("%d/%m/%Y"),
        booking.start_time,
        booking.reference,
    )
}

pub fn click_to_chat_link(recipient: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        recipient,
        urlencoding::encode(message)
    )
}
