use chrono::{NaiveDateTime, TimeDelta};
use serde::{Serialize, Serializer};

pub mod envelope;
pub mod error;

const SHARE_URL: &str = "https://app.fathom.video/share/test-recording-xyz";

// local wall-clock time, no offset, microseconds
fn iso_local<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&dt.format("%Y-%m-%dT%H:%M:%S%.6f"))
}

#[derive(Debug, Clone, Serialize)]
pub struct Speaker {
    pub display_name: String,
    pub matched_calendar_invitee_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub template_name: String,
    pub markdown_formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Person {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionItem {
    pub description: String,
    pub user_generated: bool,
    pub completed: bool,
    pub recording_timestamp: String,
    pub recording_playback_url: String,
    pub assignee: Person,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarInvitee {
    pub email: String,
    pub name: String,
    pub organizer: bool,
    pub optional: bool,
    pub response_status: String,
}

// field order is the wire order
#[derive(Debug, Clone, Serialize)]
pub struct MeetingPayload {
    pub title: String,
    pub meeting_title: String,
    pub recording_id: u64,
    pub url: String,
    pub share_url: String,
    #[serde(serialize_with = "iso_local")]
    pub created_at: NaiveDateTime,
    #[serde(serialize_with = "iso_local")]
    pub scheduled_start_time: NaiveDateTime,
    #[serde(serialize_with = "iso_local")]
    pub scheduled_end_time: NaiveDateTime,
    #[serde(serialize_with = "iso_local")]
    pub recording_start_time: NaiveDateTime,
    #[serde(serialize_with = "iso_local")]
    pub recording_end_time: NaiveDateTime,
    pub calendar_invitees_domains_type: String,
    pub transcript_language: String,
    pub transcript: Vec<TranscriptEntry>,
    pub default_summary: Summary,
    pub action_items: Vec<ActionItem>,
    pub calendar_invitees: Vec<CalendarInvitee>,
    pub recorded_by: Person,
}

fn person(name: &str, email: &str) -> Person {
    Person {
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn line(name: &str, email: &str, text: &str, timestamp: &str) -> TranscriptEntry {
    TranscriptEntry {
        speaker: Speaker {
            display_name: name.to_string(),
            matched_calendar_invitee_email: email.to_string(),
        },
        text: text.to_string(),
        timestamp: timestamp.to_string(),
    }
}

fn action(description: &str, timestamp: &str, offset_secs: u32, assignee: Person) -> ActionItem {
    ActionItem {
        description: description.to_string(),
        user_generated: false,
        completed: false,
        recording_timestamp: timestamp.to_string(),
        recording_playback_url: format!("{SHARE_URL}?timestamp={offset_secs}"),
        assignee,
    }
}

fn invitee(name: &str, email: &str, organizer: bool) -> CalendarInvitee {
    CalendarInvitee {
        email: email.to_string(),
        name: name.to_string(),
        organizer,
        optional: false,
        response_status: "accepted".to_string(),
    }
}

impl MeetingPayload {
    pub fn sample(now: NaiveDateTime) -> Self {
        let an_hour_ago = now - TimeDelta::hours(1);
        let title = "Test Meeting from Script".to_string();
        Self {
            meeting_title: title.clone(),
            title,
            recording_id: 999888777,
            url: SHARE_URL.to_string(),
            share_url: SHARE_URL.to_string(),
            created_at: now,
            scheduled_start_time: an_hour_ago,
            scheduled_end_time: now,
            recording_start_time: an_hour_ago,
            recording_end_time: now,
            calendar_invitees_domains_type: "INTERNAL".to_string(),
            transcript_language: "en".to_string(),
            transcript: vec![
                line(
                    "John Doe",
                    "john@example.com",
                    "Welcome to today's meeting. Let's discuss the project status.",
                    "00:00:15",
                ),
                line(
                    "Jane Smith",
                    "jane@example.com",
                    "Thanks John. The project is on track and we should meet our deadline.",
                    "00:01:30",
                ),
            ],
            default_summary: Summary {
                template_name: "default".to_string(),
                // literal `\n` escapes, not newlines
                markdown_formatted: r"## Meeting Summary\n\n### Key Points\n- Project is on track\n- Deadline will be met\n- Next steps identified\n\n### Decisions\n- Approved budget increase\n- Confirmed timeline".to_string(),
            },
            action_items: vec![
                action(
                    "Send project update to stakeholders",
                    "00:05:30",
                    330,
                    person("John Doe", "john@example.com"),
                ),
                action(
                    "Review budget proposal by Friday",
                    "00:08:15",
                    495,
                    person("Jane Smith", "jane@example.com"),
                ),
            ],
            calendar_invitees: vec![
                invitee("John Doe", "john@example.com", true),
                invitee("Jane Smith", "jane@example.com", false),
            ],
            recorded_by: person("John Doe", "john@example.com"),
        }
    }

    // this exact text is signed and sent
    pub fn to_body(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
