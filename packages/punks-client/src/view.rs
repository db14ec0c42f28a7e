//! Pure rendering of [`AppState`] into something a front end can draw.

use std::fmt;

use cosmwasm_std::{Coin, Decimal, Timestamp};

use crate::{config::Currency, state::AppState};

pub const COUNTDOWN_DONE: &str = "You are good to go!";
pub const PAUSED_NOTICE: &str = "Minting is currently paused.";
pub const NOT_WHITELISTED_NOTICE: &str = "You are not whitelisted.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Countdown {
    Remaining { hours: u64, minutes: u64, seconds: u64 },
    Completed,
}

impl Countdown {
    pub fn until(reveal: Timestamp, now: Timestamp) -> Self {
        if now >= reveal {
            return Countdown::Completed;
        }
        let left = reveal.seconds() - now.seconds();
        Countdown::Remaining {
            hours: left / 3600,
            minutes: left % 3600 / 60,
            seconds: left % 60,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Remaining {
                hours,
                minutes,
                seconds,
            } => write!(f, "{}:{}:{}", hours, minutes, seconds),
            Countdown::Completed => f.write_str(COUNTDOWN_DONE),
        }
    }
}

/// Mint form. Gates disable it, they never hide it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintForm {
    pub enabled: bool,
    pub waiting: bool,
    pub notices: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub account: String,
    pub preview_image: String,
    pub countdown: Countdown,
    pub available_to_mint: u64,
    pub cost: String,
    pub holdings: u64,
    pub form: MintForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Dashboard(Dashboard),
}

/// `amount` in the network's display unit, e.g. `0.001 COSM` for `1000ucosm`.
/// Unknown denoms are shown raw.
pub fn format_amount(amount: &Coin, currency: &Currency) -> String {
    if amount.denom != currency.denom {
        return amount.to_string();
    }
    match Decimal::from_atomics(amount.amount, currency.decimals) {
        Ok(value) => format!("{} {}", value, currency.display),
        Err(_) => amount.to_string(),
    }
}

pub fn render(state: &AppState, now: Timestamp) -> View {
    let (Some(account), Some(network), Some(chain)) =
        (&state.account, &state.network, &state.chain)
    else {
        return View::Loading;
    };

    let preview_image = if chain.account_balance == 0 {
        network.preview_image.clone()
    } else {
        format!("{}{}.png", network.image_base, chain.account_balance)
    };

    let mut notices = vec![];
    if chain.paused {
        notices.push(PAUSED_NOTICE);
    }
    if !chain.whitelisted {
        notices.push(NOT_WHITELISTED_NOTICE);
    }

    View::Dashboard(Dashboard {
        account: account.clone(),
        preview_image,
        countdown: Countdown::until(chain.reveal_time, now),
        available_to_mint: chain.available_to_mint(),
        cost: format_amount(&chain.cost, &network.currency),
        holdings: chain.account_balance,
        form: MintForm {
            enabled: chain.mint_allowed() && !state.is_waiting,
            waiting: state.is_waiting,
            notices,
        },
    })
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dashboard = match self {
            View::Loading => return f.write_str("Loading..."),
            View::Dashboard(dashboard) => dashboard,
        };

        writeln!(f, "Account: {} ({} owned)", dashboard.account, dashboard.holdings)?;
        writeln!(f, "Preview: {}", dashboard.preview_image)?;
        writeln!(f, "Minting opens: {}", dashboard.countdown)?;
        writeln!(f, "Available to mint: {}", dashboard.available_to_mint)?;
        writeln!(f, "Cost to mint: {} each", dashboard.cost)?;
        writeln!(f, "You own: {}", dashboard.holdings)?;

        let form = &dashboard.form;
        if form.waiting {
            write!(f, "[ minting... ]")?;
        } else if form.enabled {
            write!(f, "[ mint ]")?;
        } else {
            write!(f, "[ mint (disabled) ]")?;
        }
        for notice in &form.notices {
            write!(f, "\n{}", notice)?;
        }
        Ok(())
    }
}
