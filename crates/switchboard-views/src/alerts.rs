//! Recent-alert feed.

use serde::Serialize;

use switchboard_ipc::{AlertType, EngagementAlert};

/// Number of alerts shown in the feed by default.
pub const DEFAULT_FEED_LEN: usize = 5;

/// One rendered feed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRow {
    /// Alert id.
    pub id: String,

    /// What the viewer did.
    pub alert_type: AlertType,

    /// Viewer display name.
    pub user: String,

    /// Feed text, e.g. "alice subscribed!".
    pub message: String,
}

impl From<&EngagementAlert> for AlertRow {
    fn from(alert: &EngagementAlert) -> Self {
        Self {
            id: alert.id.clone(),
            alert_type: alert.alert_type,
            user: alert.user.clone(),
            message: alert_message(alert),
        }
    }
}

fn alert_message(alert: &EngagementAlert) -> String {
    match alert.alert_type {
        AlertType::Sub => format!("{} subscribed!", alert.user),
        AlertType::Donation => format!("{} donated!", alert.user),
        AlertType::Follow => format!("{} followed!", alert.user),
        AlertType::Raid => format!("{} is raiding!", alert.user),
        AlertType::Bits => format!("{} cheered bits!", alert.user),
    }
}

/// Render the last `len` alerts, most recent first.
///
/// `alerts` is in arrival order (oldest first).
pub fn render_feed(alerts: &[EngagementAlert], len: usize) -> Vec<AlertRow> {
    alerts.iter().rev().take(len).map(AlertRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(n: usize) -> EngagementAlert {
        EngagementAlert {
            id: format!("a{n}"),
            alert_type: AlertType::Sub,
            user: format!("viewer{n}"),
        }
    }

    #[test]
    fn test_six_alerts_show_five_newest_first() {
        let alerts: Vec<_> = (1..=6).map(alert).collect();
        let feed = render_feed(&alerts, DEFAULT_FEED_LEN);

        let ids: Vec<_> = feed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a6", "a5", "a4", "a3", "a2"]);
    }

    #[test]
    fn test_short_history_shows_all() {
        let alerts: Vec<_> = (1..=2).map(alert).collect();
        let feed = render_feed(&alerts, DEFAULT_FEED_LEN);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].message, "viewer2 subscribed!");
    }
}
