//! Root coordinator tests
//!
//! Selection, unlock, coins, comments and end-of-episode behaviour of `App`.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use dramashorts::app::{App, InputMode};
use dramashorts::catalog::{EPISODE_COUNT, LOCAL_AUTHOR, NOW_LABEL, UNLOCK_COST};
use dramashorts::ui::layout::screen_layout;
use dramashorts::{PanelIntent, PaywallIntent, PlaybackState, Tab};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn lock_flags(app: &App) -> Vec<bool> {
    app.series.episodes.iter().map(|e| e.locked).collect()
}

fn unlock_everything(app: &mut App) {
    for ep in &mut app.series.episodes {
        ep.locked = false;
    }
}

// =============================================================================
// Seed State
// =============================================================================

#[test]
fn test_seed_lock_flags() {
    let app = App::new();
    assert_eq!(app.series.episodes.len(), EPISODE_COUNT as usize);
    for ep in &app.series.episodes {
        assert_eq!(ep.locked, ep.id > 3, "episode {} lock flag", ep.id);
    }
}

// =============================================================================
// Episode Selection
// =============================================================================

#[test]
fn test_select_unlocked_switches_playback() {
    let mut app = App::new();
    app.select_episode(3);

    assert_eq!(app.current_episode, 3);
    assert_eq!(app.player.episode_id, Some(3));
    assert_eq!(app.player.position, Duration::ZERO);
    assert!(!app.show_unlock_modal);
    assert_eq!(app.pending_unlock, None);
}

#[test]
fn test_select_locked_opens_paywall_without_switching() {
    let mut app = App::new();
    app.select_episode(7);

    assert!(app.show_unlock_modal);
    assert_eq!(app.pending_unlock, Some(7));
    assert_eq!(app.current_episode, 1);
    assert_eq!(app.player.episode_id, Some(1));
}

#[test]
fn test_select_current_episode_does_not_reload() {
    let mut app = App::new();
    app.tick(Duration::from_secs(10));
    app.select_episode(1);

    assert_eq!(app.player.position, Duration::from_secs(10));
}

#[test]
fn test_select_unknown_episode_is_ignored() {
    let mut app = App::new();
    app.select_episode(999);
    assert_eq!(app.current_episode, 1);
    assert!(!app.show_unlock_modal);
}

// =============================================================================
// Unlock
// =============================================================================

#[test]
fn test_unlock_when_affordable() {
    let mut app = App::new();
    let before = lock_flags(&app);

    app.select_episode(5);
    app.confirm_unlock();

    assert_eq!(app.coins, 150 - UNLOCK_COST);
    assert_eq!(app.current_episode, 5);
    assert!(!app.series.episode(5).unwrap().locked);
    assert!(!app.show_unlock_modal);
    assert_eq!(app.pending_unlock, None);

    // Only episode 5 changed
    let after = lock_flags(&app);
    for (i, (b, a)) in before.iter().zip(after.iter()).enumerate() {
        if i == 4 {
            assert!(*b && !*a);
        } else {
            assert_eq!(b, a, "episode {} lock flag changed", i + 1);
        }
    }
}

#[test]
fn test_unlock_when_short_is_noop() {
    let mut app = App::new();
    app.coins = 30;
    let before = lock_flags(&app);

    app.select_episode(5);
    app.confirm_unlock();

    assert_eq!(app.coins, 30);
    assert_eq!(lock_flags(&app), before);
    assert_eq!(app.current_episode, 1);
    // Modal stays open on a rejected confirm
    assert!(app.show_unlock_modal);
    assert_eq!(app.pending_unlock, Some(5));
}

#[test]
fn test_unlock_with_exact_balance() {
    let mut app = App::new();
    app.coins = UNLOCK_COST;
    app.select_episode(4);
    app.confirm_unlock();
    assert_eq!(app.coins, 0);
    assert_eq!(app.current_episode, 4);
}

#[test]
fn test_confirm_without_pending_is_noop() {
    let mut app = App::new();
    app.confirm_unlock();
    assert_eq!(app.coins, 150);
    assert_eq!(app.current_episode, 1);
}

#[test]
fn test_close_keeps_pending_target() {
    let mut app = App::new();
    app.select_episode(6);
    app.apply_paywall(PaywallIntent::Close);

    assert!(!app.show_unlock_modal);
    assert_eq!(app.pending_unlock, Some(6));
    assert_eq!(app.coins, 150);
}

#[test]
fn test_package_choice_has_no_effect() {
    let mut app = App::new();
    app.coins = 0;
    app.select_episode(6);
    app.apply_paywall(PaywallIntent::ChoosePackage(1));

    assert_eq!(app.coins, 0);
    assert!(app.show_unlock_modal);
}

#[test]
fn test_three_unlocks_then_short() {
    let mut app = App::new();
    for id in [4, 5, 6] {
        app.select_episode(id);
        app.confirm_unlock();
    }
    assert_eq!(app.coins, 0);
    assert_eq!(app.current_episode, 6);

    app.select_episode(7);
    app.confirm_unlock();
    assert_eq!(app.current_episode, 6);
    assert!(app.series.episode(7).unwrap().locked);
}

// =============================================================================
// Coins
// =============================================================================

#[test]
fn test_add_coins_notifies() {
    let mut app = App::new();
    app.add_coins();
    assert_eq!(app.coins, 250);
    assert_eq!(
        app.notice.as_deref(),
        Some("Simulação: +100 moedas adicionadas!")
    );
}

#[test]
fn test_add_coins_then_unlock() {
    let mut app = App::new();
    app.coins = 0;
    app.select_episode(10);
    app.close_unlock_modal();
    app.add_coins();

    // Pending target survived the close; reopening by selection works
    app.select_episode(10);
    app.confirm_unlock();
    assert_eq!(app.coins, 50);
    assert_eq!(app.current_episode, 10);
}

// =============================================================================
// Comments
// =============================================================================

#[test]
fn test_comment_prepends_and_keeps_order() {
    let mut app = App::new();
    let before: Vec<u64> = app.series.comments.iter().map(|c| c.id).collect();

    app.apply(PanelIntent::SubmitComment("hello".into()));

    let first = &app.series.comments[0];
    assert_eq!(first.text, "hello");
    assert_eq!(first.user, LOCAL_AUTHOR);
    assert_eq!(first.timestamp, NOW_LABEL);
    assert_eq!(first.likes, 0);

    let after: Vec<u64> = app.series.comments[1..].iter().map(|c| c.id).collect();
    assert_eq!(after, before);
}

#[test]
fn test_comment_ids_are_unique() {
    let mut app = App::new();
    app.add_comment("um");
    app.add_comment("dois");
    assert!(app.series.comments[0].id > app.series.comments[1].id);
}

#[test]
fn test_blank_comment_leaves_collection_unchanged() {
    let mut app = App::new();
    let before = app.series.comments.clone();

    app.panel.switch_tab(Tab::Comments);
    app.handle_key(key(KeyCode::Char('i')));
    for c in "   ".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.series.comments, before);
}

// =============================================================================
// End of Playback
// =============================================================================

#[test]
fn test_end_advances_to_next() {
    let mut app = App::new();
    app.select_episode(2);
    app.tick(Duration::from_secs(90));

    assert_eq!(app.current_episode, 3);
    assert_eq!(app.player.state, PlaybackState::Playing);
}

#[test]
fn test_end_into_locked_episode_opens_paywall() {
    let mut app = App::new();
    app.select_episode(3);
    app.tick(Duration::from_secs(90));

    assert_eq!(app.current_episode, 3);
    assert!(app.show_unlock_modal);
    assert_eq!(app.pending_unlock, Some(4));
}

#[test]
fn test_end_on_last_episode_stays() {
    let mut app = App::new();
    unlock_everything(&mut app);
    app.select_episode(EPISODE_COUNT);
    app.tick(Duration::from_secs(90));

    assert_eq!(app.current_episode, EPISODE_COUNT);
    assert_eq!(app.player.state, PlaybackState::Paused);

    // Resting at the end does not re-fire
    app.tick(Duration::from_secs(5));
    assert_eq!(app.current_episode, EPISODE_COUNT);
}

#[test]
fn test_paused_player_does_not_advance() {
    let mut app = App::new();
    app.player.toggle_play();
    app.tick(Duration::from_secs(300));
    assert_eq!(app.current_episode, 1);
    assert_eq!(app.player.position, Duration::ZERO);
}

// =============================================================================
// Input Routing
// =============================================================================

#[test]
fn test_modal_enter_confirms() {
    let mut app = App::new();
    app.select_episode(8);
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.current_episode, 8);
    assert_eq!(app.coins, 100);
}

#[test]
fn test_modal_blocks_tab_switch() {
    let mut app = App::new();
    app.select_episode(8);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.panel.active_tab, Tab::Episodes);
}

#[test]
fn test_paywall_opened_while_typing_ignores_typed_keys() {
    let mut app = App::new();
    app.select_episode(3);
    app.panel.switch_tab(Tab::Comments);
    app.handle_key(key(KeyCode::Char('i')));
    for c in "eu amo".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }

    // Episode 3 ends; episode 4 is locked
    app.tick(Duration::from_secs(90));
    assert!(app.show_unlock_modal);
    assert_eq!(app.input_mode, InputMode::Editing);

    for c in " mais, yes".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }

    assert_eq!(app.coins, 150);
    assert!(app.series.episode(4).unwrap().locked);
    assert_eq!(app.current_episode, 3);
    assert!(app.show_unlock_modal);
    assert_eq!(app.panel.comments.input.value, "eu amo mais, yes");

    // Leaving the field hands the keyboard to the modal
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.show_unlock_modal);
    app.handle_key(key(KeyCode::Esc));
    assert!(!app.show_unlock_modal);
    assert_eq!(app.coins, 150);
}

#[test]
fn test_paywall_enter_while_typing_submits_draft() {
    let mut app = App::new();
    app.select_episode(3);
    app.panel.switch_tab(Tab::Comments);
    app.handle_key(key(KeyCode::Char('i')));
    app.tick(Duration::from_secs(90));

    for c in "ok".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.series.comments[0].text, "ok");
    assert_eq!(app.coins, 150);
    assert!(app.series.episode(4).unwrap().locked);
}

#[test]
fn test_escape_leaves_editing_keeps_draft() {
    let mut app = App::new();
    app.handle_key(key(KeyCode::Char('4')));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.input_mode, InputMode::Editing);
    app.handle_key(key(KeyCode::Char('é')));
    app.handle_key(key(KeyCode::Esc));

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.panel.chat.input.value, "é");
}

#[test]
fn test_click_on_progress_bar_seeks() {
    let mut app = App::new();
    let area = Rect::new(0, 0, 120, 40);
    let bar = screen_layout(area).player.progress_bar;

    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: bar.x + bar.width / 2,
        row: bar.y,
        modifiers: KeyModifiers::empty(),
    };
    assert!(app.handle_mouse(click, area));

    let half = app.player.duration / 2;
    let delta = if app.player.position > half {
        app.player.position - half
    } else {
        half - app.player.position
    };
    assert!(delta < Duration::from_secs(2));
}

#[test]
fn test_click_outside_progress_bar_ignored() {
    let mut app = App::new();
    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 0,
        row: 0,
        modifiers: KeyModifiers::empty(),
    };
    assert!(!app.handle_mouse(click, Rect::new(0, 0, 120, 40)));
    assert_eq!(app.player.position, Duration::ZERO);
}
