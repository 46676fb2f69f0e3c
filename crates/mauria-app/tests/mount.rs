//! End-to-end mount flow against a scripted host.

use std::collections::BTreeMap;

use tokio::sync::mpsc;

use mauria_app::{mount, AppConfig};
use mauria_shared::HostMessage;
use mauria_sync::{HostLink, SettleReason};

fn scripted_link(embedded: bool) -> (HostLink, mpsc::Receiver<HostMessage>, mpsc::Sender<HostMessage>) {
    let (to_host, host_rx) = mpsc::channel(16);
    let (host_tx, from_host) = mpsc::channel(16);
    (
        HostLink {
            embedded,
            to_host,
            from_host,
        },
        host_rx,
        host_tx,
    )
}

#[tokio::test(start_paused = true)]
async fn mount_settles_with_host_data_and_audit_trail() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: Some(dir.path().to_path_buf()),
        ..AppConfig::default()
    };

    let (mut link, mut host_rx, host_tx) = scripted_link(true);
    tokio::spawn(async move {
        let _ = host_tx.send(HostMessage::ParentReady).await;
        if host_rx.recv().await == Some(HostMessage::RequestAllData) {
            let _ = host_tx
                .send(HostMessage::AllDataResponse {
                    payload: BTreeMap::from([
                        ("email".to_string(), "prenom.nom@example.fr".to_string()),
                        ("password".to_string(), "hunter2".to_string()),
                        ("theme".to_string(), "dark".to_string()),
                    ]),
                })
                .await;
        }
    });

    let state = mount(&config, &mut link).await.unwrap();

    assert_eq!(state.bootstrap.reason, SettleReason::AllDataReceived);
    assert!(state.logged_in());
    assert_eq!(state.store.read("theme").as_deref(), Some("dark"));

    // The launch marker precedes the bootstrap commits in the audit trail.
    let log = state.store.read_log();
    assert_eq!(
        log.first().map(|entry| entry.action),
        Some(mauria_store::LogAction::Launch)
    );
}

#[tokio::test(start_paused = true)]
async fn mount_without_a_host_still_becomes_interactive() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: Some(dir.path().to_path_buf()),
        ..AppConfig::default()
    };

    let (mut link, _host_rx, _host_tx) = scripted_link(true);
    let state = mount(&config, &mut link).await.unwrap();

    // Mute host: degraded settlement, app usable with no remote data.
    assert_eq!(state.bootstrap.reason, SettleReason::AttemptsExhausted);
    assert!(!state.logged_in());
}

#[tokio::test(start_paused = true)]
async fn first_launch_flag_flips_after_the_first_mount() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: Some(dir.path().to_path_buf()),
        ..AppConfig::default()
    };

    let (mut link, _host_rx, _host_tx) = scripted_link(false);
    let state = mount(&config, &mut link).await.unwrap();
    assert!(!state.store.first_launch());
    drop(state);

    // A second mount against the same data dir is no longer a first launch.
    let (mut link, _host_rx, _host_tx) = scripted_link(false);
    let state = mount(&config, &mut link).await.unwrap();
    assert!(!state.store.first_launch());
}

#[tokio::test(start_paused = true)]
async fn upcoming_merges_user_events_with_remote_lessons() {
    use mauria_shared::{Lesson, UserEvent};

    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: Some(dir.path().to_path_buf()),
        ..AppConfig::default()
    };

    let (mut link, _host_rx, _host_tx) = scripted_link(false);
    let state = mount(&config, &mut link).await.unwrap();

    state.store.add_event(&UserEvent {
        id: uuid::Uuid::new_v4(),
        title: "Réunion BDE".into(),
        start: "2025-09-23T18:00:00+02:00".into(),
        end: "2025-09-23T19:00:00+02:00".into(),
        all_day: false,
        editable: true,
        class_name: "perso".into(),
    });

    let remote = vec![Lesson {
        id: "l1".into(),
        title: "B305\nMathématiques\nCM\nM. Durand".into(),
        start: "2025-09-23T14:00:00+0200".into(),
        end: "2025-09-23T15:00:00+0200".into(),
        all_day: false,
        editable: false,
        class_name: "est".into(),
    }];

    let now = "2025-09-23T12:00:00+02:00".parse().unwrap();
    let upcoming = state.upcoming(now, &remote);

    assert!(upcoming.current.is_none());
    assert_eq!(upcoming.today.len(), 2);
    assert_eq!(upcoming.today[0].details.course_title, "Mathématiques");
    // A single-line event title decodes positionally: the line lands in
    // `location` and the course title falls back to the class field.
    assert_eq!(upcoming.today[1].details.location, "Réunion BDE");
    assert_eq!(upcoming.today[1].details.course_title, "perso");
    assert_eq!(upcoming.today[1].time_range, "18:00 - 19:00");
}

#[tokio::test(start_paused = true)]
async fn beta_mode_is_announced_after_settlement() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: Some(dir.path().to_path_buf()),
        beta: true,
        ..AppConfig::default()
    };

    let (mut link, mut host_rx, host_tx) = scripted_link(false);
    let host = tokio::spawn(async move {
        if host_rx.recv().await == Some(HostMessage::RequestAllData) {
            let _ = host_tx
                .send(HostMessage::AllDataResponse {
                    payload: BTreeMap::from([(
                        "email".to_string(),
                        "prenom.nom@example.fr".to_string(),
                    )]),
                })
                .await;
        }

        // After settlement the beta announcement shows up.
        assert_eq!(
            host_rx.recv().await,
            Some(HostMessage::ModeBeta {
                payload: "https://preprod.mauria.app".to_string()
            })
        );
    });

    let state = mount(&config, &mut link).await.unwrap();
    assert_eq!(state.bootstrap.reason, SettleReason::AllDataReceived);
    host.await.unwrap();
}
