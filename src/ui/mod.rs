//! Terminal front-end.
//!
//! Renders each session screen and translates prompt answers into engine
//! events. Purely a consumer of engine state: every rule (sanitization,
//! lockout, stage transitions) lives in the library; this loop only draws
//! and forwards. Hovering has no terminal equivalent, so the proposal
//! prompt exposes it as its own key.

pub mod style;

use crate::config::RewardVariant;
use crate::runtime::ExperienceRuntime;
use crate::script::{self, copy};
use crate::session::Screen;
use crate::session::event::Event;
use anyhow::Result;
use dialoguer::{Confirm, Input, Password};
use std::time::Instant;

pub async fn run(mut rt: ExperienceRuntime) -> Result<()> {
    loop {
        rt.drain_ready();
        match rt.session().screen() {
            Screen::Gate => {
                if !gate_screen(&mut rt).await? {
                    return Ok(());
                }
            }
            Screen::Proposal => proposal_screen(&mut rt).await?,
            Screen::Cinematic => cinematic_screen(&mut rt).await,
            Screen::Reward => {
                if !reward_screen(&mut rt).await? {
                    return Ok(());
                }
            }
        }
    }
}

/// Returns `false` when the user quits.
async fn gate_screen(rt: &mut ExperienceRuntime) -> Result<bool> {
    let now = Instant::now();
    let gate = rt.session().gate();

    if let Some(remaining) = gate.remaining_lockout_secs(now) {
        println!(
            "  {}",
            style::denied(copy::GATE_LOCKED.replace("{remaining}", &remaining.to_string()))
        );
        // The 1s tick refreshes the countdown until the lockout elapses.
        let _ = rt.process_next().await;
        return Ok(true);
    }

    println!();
    println!("  {}", style::header(copy::GATE_TITLE));
    let code: String = Password::new()
        .with_prompt("  4-digit code (or q to quit)")
        .allow_empty_password(true)
        .interact()?;
    if code.trim() == "q" {
        return Ok(false);
    }

    rt.dispatch(Event::GateInput(code));
    rt.dispatch(Event::GateSubmit);

    if rt.session().gate().is_unlocking() {
        println!("  {}", style::heart(copy::GATE_UNLOCKING));
        // Wait out the unlock presentation delay.
        while !rt.session().gate().is_unlocked() {
            let _ = rt.process_next().await;
        }
    } else if rt.session().gate().error_visible() {
        println!("  {}", style::denied(copy::GATE_DENIED));
    }
    Ok(true)
}

async fn proposal_screen(rt: &mut ExperienceRuntime) -> Result<()> {
    // An active reveal message auto-advances; just watch it play out.
    if let Some(index) = rt.session().choreography().active_message() {
        if let Some(message) = script::reveal_message(index) {
            println!();
            println!("  {}", style::heart(message));
        }
        let _ = rt.process_next().await;
        return Ok(());
    }

    if rt.session().choreography().accepted() {
        println!();
        println!("  {}", style::heart(copy::ACCEPTED_BANNER));
        // Acceptance pause, then the cinematic takes over.
        let _ = rt.process_next().await;
        return Ok(());
    }

    let choreo = rt.session().choreography();
    let (x, y) = choreo.no_offset();
    println!();
    println!("  {}", style::header(copy::PROPOSAL_TITLE));
    println!(
        "  {}   {}",
        style::success("[Yes]"),
        style::taunt(format!("[{}] (at {x:+.0},{y:+.0})", choreo.no_label()))
    );

    let answer: String = Input::new()
        .with_prompt("  y = yes, n = click No, h = hover No, r = start over")
        .interact_text()?;
    match answer.trim() {
        "y" => rt.dispatch(Event::YesClick),
        "n" => rt.dispatch(Event::NoClick),
        "h" => rt.dispatch(Event::NoHover),
        "r" => rt.dispatch(Event::Reset),
        _ => {}
    }
    Ok(())
}

async fn cinematic_screen(rt: &mut ExperienceRuntime) {
    use crate::cinematic::ScenePhase;
    match rt.session().cinematic().phase() {
        ScenePhase::Beach => println!("  {}", style::scene(copy::SCENE_BEACH)),
        ScenePhase::Drive => println!("  {}", style::scene(copy::SCENE_DRIVE)),
        ScenePhase::None => {}
    }
    // Scenes run on their own timers; wait for the next transition.
    let _ = rt.process_next().await;
}

/// Returns `false` when the user is done.
async fn reward_screen(rt: &mut ExperienceRuntime) -> Result<bool> {
    match rt.session().reward_variant() {
        RewardVariant::SurpriseLink => {
            println!();
            println!("  {}", style::heart(copy::SURPRISE_TITLE));
            if let Some(url) = &rt.session().config().gift.surprise_url {
                println!("  {}", style::url(url));
            }
        }
        RewardVariant::GiftIntake => {
            if !rt.session().gift().is_submitted() {
                println!();
                println!("  {}", style::header(copy::GIFT_PROMPT));
                let wish: String = Input::new().with_prompt("  your wish").interact_text()?;
                rt.dispatch(Event::GiftInput(wish));
                rt.dispatch(Event::GiftSubmit);
                while rt.session().gift().is_sending() {
                    let _ = rt.process_next().await;
                }
            }
            if rt.session().gift().is_submitted() {
                println!("  {}", style::dim(rt.session().gift().text()));
                let line = if rt.session().gift().used_fallback() {
                    copy::GIFT_FALLBACK
                } else {
                    copy::GIFT_DELIVERED
                };
                println!("  {}", style::success(line));
            }
        }
    }

    let again = Confirm::new()
        .with_prompt("  start over?")
        .default(false)
        .interact()?;
    if again {
        rt.dispatch(Event::Reset);
        return Ok(true);
    }
    Ok(false)
}
