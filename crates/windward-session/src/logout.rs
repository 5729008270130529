//! Logout planning: from a reason to a list of follow-up actions.
//!
//! Completing a logout always disconnects and marks the session logged
//! out; what happens *next* depends on why we logged out. Instead of a
//! switch statement with side effects buried in each arm, [`plan`] is a
//! pure function returning the ordered follow-ups, and the controller
//! executes them. Each reason's consequences can then be asserted in a
//! unit test without a connection or a UI.

use windward_protocol::LogoutReason;

/// One action the controller must take after a logout completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Terminate the client cleanly.
    Quit,

    /// Log a warning with captured stack context: a logout with reason
    /// `Login` should never reach completion in correct operation. The
    /// session still ends up logged out; this is diagnosis, not a crash.
    WarnAnomaly,

    /// Stop a locally hosted server, if one is running.
    StopLocalServer,

    /// Hand presentation control back to the main title screen.
    ShowMainTitle,

    /// Hand presentation control back to the new-game setup screen.
    ShowNewGamePanel,

    /// Re-dial the remote endpoint and log in again with the same
    /// player name, version, and flags. The only reason whose logout
    /// implies a new login — it models transient network loss, not a
    /// deliberate session end.
    Reconnect,
}

/// What a completed logout must do. Every plan marks the session logged
/// out and closes the connection first; `follow_ups` lists what comes
/// after, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutPlan {
    pub follow_ups: Vec<FollowUp>,
}

/// Plans the follow-up actions for a logout with the given reason.
pub fn plan(reason: LogoutReason) -> LogoutPlan {
    let follow_ups = match reason {
        LogoutReason::Defeated | LogoutReason::Quit => {
            vec![FollowUp::Quit]
        }
        LogoutReason::Login => vec![FollowUp::WarnAnomaly],
        LogoutReason::MainTitle => {
            vec![FollowUp::StopLocalServer, FollowUp::ShowMainTitle]
        }
        LogoutReason::NewGame => {
            vec![FollowUp::StopLocalServer, FollowUp::ShowNewGamePanel]
        }
        LogoutReason::Reconnect => vec![FollowUp::Reconnect],
    };
    LogoutPlan { follow_ups }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_defeated_and_quit_terminate_the_client() {
        assert_eq!(
            plan(LogoutReason::Defeated).follow_ups,
            vec![FollowUp::Quit]
        );
        assert_eq!(
            plan(LogoutReason::Quit).follow_ups,
            vec![FollowUp::Quit]
        );
    }

    #[test]
    fn test_plan_login_only_warns() {
        assert_eq!(
            plan(LogoutReason::Login).follow_ups,
            vec![FollowUp::WarnAnomaly]
        );
    }

    #[test]
    fn test_plan_main_title_stops_server_before_showing_menu() {
        // Order matters: the local server must be gone before the menu
        // offers to start a new one.
        assert_eq!(
            plan(LogoutReason::MainTitle).follow_ups,
            vec![FollowUp::StopLocalServer, FollowUp::ShowMainTitle]
        );
    }

    #[test]
    fn test_plan_new_game_stops_server_before_setup_screen() {
        assert_eq!(
            plan(LogoutReason::NewGame).follow_ups,
            vec![FollowUp::StopLocalServer, FollowUp::ShowNewGamePanel]
        );
    }

    #[test]
    fn test_plan_reconnect_is_the_only_relogin_path() {
        for reason in [
            LogoutReason::Defeated,
            LogoutReason::Quit,
            LogoutReason::Login,
            LogoutReason::MainTitle,
            LogoutReason::NewGame,
            LogoutReason::Reconnect,
        ] {
            let has_reconnect = plan(reason)
                .follow_ups
                .contains(&FollowUp::Reconnect);
            assert_eq!(
                has_reconnect,
                reason == LogoutReason::Reconnect,
                "unexpected reconnect policy for {reason}"
            );
        }
    }
}
