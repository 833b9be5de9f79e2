use std::io::{self, BufRead, Write};
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use labbook::app::{App, View};
use labbook::config::AppConfig;
use labbook::models::{BookingType, StatusAction};
use labbook::services::api::HttpBookingApi;
use labbook::validation::BookingForm;
use labbook::views;

type InputLines = io::Lines<io::StdinLock<'static>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    tracing::info!("using backend at {}", config.api_base_url);

    let api = HttpBookingApi::new(&config.api_base_url);
    let mut app = App::new(Box::new(api));

    let mut lines = io::stdin().lock().lines();
    loop {
        app.drop_expired_toast(Instant::now());
        print!("{}", render(&app));
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") {
            break;
        }
        dispatch(&mut app, input, &mut lines).await?;
    }

    Ok(())
}

fn render(app: &App) -> String {
    let mut out = String::from("\n");
    if let Some(toast) = &app.toast {
        out.push_str(&views::toast_line(toast));
        out.push('\n');
    }
    let body = match app.view {
        View::Search => views::search::render(),
        View::Bookings => match &app.query_result {
            Some(result) => views::bookings::render(result),
            None => views::search::render(),
        },
        View::Create => views::create::render(),
        View::Details => match &app.selected {
            Some(booking) => views::details::render(booking),
            None => views::search::render(),
        },
        View::Success => match &app.receipt {
            Some(receipt) => views::success::render(receipt),
            None => views::search::render(),
        },
    };
    out.push_str(&body);
    out
}

// The list card offers actions for the latest booking only; resolve the
// typed key against what that booking's status actually offers.
fn latest_action(app: &App, key: &str) -> Option<(String, StatusAction)> {
    let latest = app.query_result.as_ref()?.latest_booking.as_ref()?;
    let action = views::action_for_key(latest.effective_status(), key)?;
    Some((latest.booking_id.clone(), action))
}

fn confirm_cancel(lines: &mut InputLines) -> anyhow::Result<bool> {
    let answer = ask(lines, "Are you sure you want to cancel this booking? [y/N]")?;
    Ok(views::confirms(&answer))
}

async fn dispatch(app: &mut App, input: &str, lines: &mut InputLines) -> anyhow::Result<()> {
    match app.view {
        View::Search => match input {
            "" => {}
            "new" => app.create_new(),
            phone => app.search_phone(phone).await,
        },
        View::Bookings => {
            if input == "back" {
                app.back();
            } else if let Some(id) = input.strip_prefix("view ") {
                app.view_details(id.trim()).await;
            } else if let Some((id, action)) = latest_action(app, input) {
                match action {
                    StatusAction::Cancel => {
                        if confirm_cancel(lines)? {
                            app.cancel_in_list(&id).await;
                        }
                    }
                    StatusAction::StartProcessing | StatusAction::MarkComplete => {
                        app.advance_status_in_list(&id).await;
                    }
                }
            }
        }
        View::Create => match input {
            "back" => app.back(),
            "fill" | "" => {
                let form = prompt_form(lines)?;
                let today = chrono::Local::now().date_naive();
                app.submit_booking(&form, today).await;
            }
            _ => {}
        },
        View::Details => {
            if input == "back" {
                app.back();
            } else if let Some(action) = app
                .selected
                .as_ref()
                .and_then(|b| views::action_for_key(b.booking_status, input))
            {
                match action {
                    StatusAction::Cancel => {
                        if confirm_cancel(lines)? {
                            app.cancel_selected().await;
                        }
                    }
                    StatusAction::StartProcessing | StatusAction::MarkComplete => {
                        app.advance_status().await;
                    }
                }
            }
        }
        View::Success => match input {
            "home" => app.back(),
            "another" => app.create_another(),
            _ => {}
        },
    }
    Ok(())
}

fn ask(lines: &mut InputLines, label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Ok(String::new()),
    }
}

fn prompt_form(lines: &mut InputLines) -> anyhow::Result<BookingForm> {
    let phone_number = ask(lines, "Phone Number")?;
    let customer_name = ask(lines, "Customer Name")?;
    let customer_email = ask(lines, "Customer Email (optional)")?;
    let kind = ask(lines, "Booking Type [1 = home collection, 2 = walk-in lab]")?;
    let booking_type = if kind == "2" {
        BookingType::WalkInLab
    } else {
        BookingType::HomeCollection
    };
    let test_code = ask(lines, "Test Code")?;
    let test_name = ask(lines, "Test Name")?;
    let total_price = ask(lines, "Total Price")?;
    let appointment_date = ask(lines, "Appointment Date (YYYY-MM-DD)")?;
    let appointment_time = ask(lines, "Appointment Time")?;

    let mut address = String::new();
    let mut phlebotomist_id = String::new();
    let mut lab_id = String::new();
    match booking_type {
        BookingType::HomeCollection => {
            address = ask(lines, "Address")?;
            phlebotomist_id = ask(lines, "Phlebotomist ID")?;
        }
        BookingType::WalkInLab => {
            lab_id = ask(lines, "Lab ID")?;
        }
    }

    Ok(BookingForm {
        phone_number,
        customer_name,
        customer_email,
        booking_type,
        test_code,
        test_name,
        total_price,
        appointment_date,
        appointment_time,
        address,
        phlebotomist_id,
        lab_id,
    })
}
