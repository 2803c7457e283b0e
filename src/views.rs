//! Server-rendered HTML pages.

use std::fmt::Write;

use crate::i18n::{Locale, Text};
use crate::models::{OwnerBooking, Service, ServiceListing};
use crate::session::{CurrentUser, Flash};

const STYLE: &str = "body{font-family:sans-serif;max-width:860px;margin:0 auto;padding:1rem}\
nav a{margin-right:1rem}\
.flash{padding:.6rem 1rem;margin:.5rem 0;border-radius:4px}\
.flash-success{background:#d1e7dd}.flash-danger{background:#f8d7da}\
.flash-warning{background:#fff3cd}.flash-info{background:#cff4fc}\
.badge{background:#dc3545;color:#fff;border-radius:8px;padding:0 .4rem;font-size:.8rem}\
.service{border-bottom:1px solid #ddd;padding:.5rem 0}\
label{display:block;margin-top:.6rem}\
table{border-collapse:collapse;width:100%}td,th{border-bottom:1px solid #ddd;padding:.3rem;text-align:left}";

// Refreshes the unseen-bookings badge for logged-in users.
const POLL_SCRIPT: &str = "<script>\
(function(){var b=document.getElementById('new-count');if(!b)return;\
function poll(){fetch('/new_bookings_count').then(function(r){return r.json()})\
.then(function(d){b.textContent=d.new_count;b.hidden=d.new_count===0}).catch(function(){})}\
poll();setInterval(poll,30000)})();\
</script>";

/// What every page needs besides its own content.
pub struct PageContext {
    pub locale: Locale,
    pub user: Option<CurrentUser>,
    pub flashes: Vec<Flash>,
}

impl PageContext {
    fn t(&self, text: Text) -> &'static str {
        text.get(self.locale)
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn layout(ctx: &PageContext, title: &str, body: &str) -> String {
    let mut nav = format!("<a href=\"/\">{}</a>", ctx.t(Text::Home));
    match &ctx.user {
        Some(_) => {
            let _ = write!(
                nav,
                "<a href=\"/add_service\">{}</a>\
                 <a href=\"/owner_bookings\">{} <span id=\"new-count\" class=\"badge\" title=\"{}\" hidden>0</span></a>\
                 <a href=\"/logout\">{}</a>",
                ctx.t(Text::AddService),
                ctx.t(Text::MyBookings),
                ctx.t(Text::NewBookings),
                ctx.t(Text::Logout),
            );
        }
        None => {
            let _ = write!(
                nav,
                "<a href=\"/register\">{}</a><a href=\"/login\">{}</a>",
                ctx.t(Text::Register),
                ctx.t(Text::Login),
            );
        }
    }

    let mut flashes = String::new();
    for flash in &ctx.flashes {
        let _ = write!(
            flashes,
            "<div class=\"flash flash-{}\">{}</div>",
            flash.level.as_str(),
            escape(&flash.message)
        );
    }

    let script = if ctx.user.is_some() { POLL_SCRIPT } else { "" };

    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title} · {site}</title><style>{STYLE}</style></head>\
         <body><nav>{nav}</nav>{flashes}<main><h1>{title}</h1>{body}</main>{script}</body></html>",
        lang = ctx.locale.code(),
        title = escape(title),
        site = ctx.t(Text::SiteTitle),
    )
}

pub fn home(ctx: &PageContext, services: &[ServiceListing]) -> String {
    let mut body = String::new();
    if let Some(user) = &ctx.user {
        let _ = write!(
            body,
            "<p>{}, {}!</p>",
            ctx.t(Text::Welcome),
            escape(&user.fullname)
        );
    }

    if services.is_empty() {
        let _ = write!(body, "<p>{}</p>", ctx.t(Text::NoServices));
    }
    for listing in services {
        let service = &listing.service;
        let _ = write!(
            body,
            "<div class=\"service\"><h3>{name}</h3><p>{description}</p>\
             <p>{price_label}: {price} € · {by}: {owner}</p>\
             <a href=\"/book/{id}\">{book}</a></div>",
            name = escape(&service.name),
            description = escape(&service.description),
            price_label = ctx.t(Text::Price),
            price = service.price,
            by = ctx.t(Text::OfferedBy),
            owner = escape(&listing.owner_fullname),
            id = service.id,
            book = ctx.t(Text::Book),
        );
    }

    layout(ctx, ctx.t(Text::Services), &body)
}

fn field(label: &str, name: &str, kind: &str) -> String {
    format!(
        "<label>{label}<br><input type=\"{kind}\" name=\"{name}\" required></label>"
    )
}

fn form(ctx: &PageContext, action: &str, fields: &[String]) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">{}<p><button type=\"submit\">{}</button></p></form>",
        fields.concat(),
        ctx.t(Text::Submit),
    )
}

pub fn register(ctx: &PageContext) -> String {
    let body = form(
        ctx,
        "/register",
        &[
            field(ctx.t(Text::FullName), "fullname", "text"),
            field(ctx.t(Text::Email), "email", "email"),
            field(ctx.t(Text::Password), "password", "password"),
        ],
    );
    layout(ctx, ctx.t(Text::Register), &body)
}

pub fn login(ctx: &PageContext) -> String {
    let body = form(
        ctx,
        "/login",
        &[
            field(ctx.t(Text::Email), "email", "email"),
            field(ctx.t(Text::Password), "password", "password"),
        ],
    );
    layout(ctx, ctx.t(Text::Login), &body)
}

pub fn add_service(ctx: &PageContext) -> String {
    let description = format!(
        "<label>{}<br><textarea name=\"description\" rows=\"4\" required></textarea></label>",
        ctx.t(Text::Description)
    );
    let price = format!(
        "<label>{}<br><input type=\"text\" inputmode=\"decimal\" name=\"price\" required></label>",
        ctx.t(Text::Price)
    );
    let body = form(
        ctx,
        "/add_service",
        &[field(ctx.t(Text::ServiceName), "name", "text"), description, price],
    );
    layout(ctx, ctx.t(Text::AddService), &body)
}

pub fn book_service(ctx: &PageContext, service: &Service) -> String {
    let intro = format!(
        "<h2>{}</h2><p>{}</p><p>{}: {} €</p>",
        escape(&service.name),
        escape(&service.description),
        ctx.t(Text::Price),
        service.price,
    );
    let action = format!("/book/{}", service.id);
    let body = intro + &form(ctx, &action, &[field(ctx.t(Text::YourEmail), "email", "email")]);
    layout(ctx, ctx.t(Text::BookService), &body)
}

pub fn owner_bookings(ctx: &PageContext, bookings: &[OwnerBooking]) -> String {
    if bookings.is_empty() {
        let body = format!("<p>{}</p>", ctx.t(Text::NoBookings));
        return layout(ctx, ctx.t(Text::MyBookings), &body);
    }

    let mut rows = String::new();
    for entry in bookings {
        let status = if entry.booking.seen {
            ctx.t(Text::Seen).to_string()
        } else {
            format!("<strong>{}</strong>", ctx.t(Text::New))
        };
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&entry.service_name),
            escape(&entry.booking.user_email),
            entry.booking.datetime.format("%d/%m/%Y %H:%M"),
            status,
        );
    }

    let body = format!(
        "<table><thead><tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr></thead><tbody>{rows}</tbody></table>",
        ctx.t(Text::Service),
        ctx.t(Text::Customer),
        ctx.t(Text::Date),
        ctx.t(Text::Status),
    );
    layout(ctx, ctx.t(Text::MyBookings), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FlashLevel;

    fn anonymous() -> PageContext {
        PageContext {
            locale: Locale::En,
            user: None,
            flashes: vec![],
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_flashes_rendered_with_level() {
        let ctx = PageContext {
            flashes: vec![Flash {
                level: FlashLevel::Danger,
                message: "<b>nope</b>".to_string(),
            }],
            ..anonymous()
        };
        let html = login(&ctx);
        assert!(html.contains("flash-danger"));
        assert!(html.contains("&lt;b&gt;nope&lt;/b&gt;"));
    }

    #[test]
    fn test_nav_depends_on_user() {
        let html = home(&anonymous(), &[]);
        assert!(html.contains("href=\"/login\""));
        assert!(!html.contains("new_bookings_count"));

        let ctx = PageContext {
            user: Some(CurrentUser {
                id: 1,
                fullname: "Irini".to_string(),
            }),
            ..anonymous()
        };
        let html = home(&ctx, &[]);
        assert!(html.contains("href=\"/logout\""));
        assert!(html.contains("Welcome, Irini!"));
        assert!(html.contains("new_bookings_count"));
    }
}
