//! Short-lived status banners for input errors and completed actions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use leptos::prelude::*;

static NEXT_NOTICE: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
	Info,
	Success,
	Warning,
	Error,
}

impl NoticeLevel {
	const fn class(self) -> &'static str {
		match self {
			Self::Info => "notice notice-info",
			Self::Success => "notice notice-success",
			Self::Warning => "notice notice-warning",
			Self::Error => "notice notice-error",
		}
	}

	/// How long the banner stays up.
	const fn duration(self) -> Duration {
		match self {
			Self::Error => Duration::from_millis(2500),
			_ => Duration::from_millis(2000),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	id: u64,
	pub level: NoticeLevel,
	pub title: String,
	pub description: String,
}

/// Shows a notice in `slot` and clears it again unless a newer one replaced it.
pub fn show_notice(
	slot: RwSignal<Option<Notice>>,
	level: NoticeLevel,
	title: &str,
	description: impl Into<String>,
) {
	let id = NEXT_NOTICE.fetch_add(1, Ordering::Relaxed);
	slot.set(Some(Notice {
		id,
		level,
		title: title.to_string(),
		description: description.into(),
	}));
	set_timeout(
		move || {
			slot.update(|current| {
				if current.as_ref().is_some_and(|n| n.id == id) {
					*current = None;
				}
			});
		},
		level.duration(),
	);
}

#[component]
pub fn NoticeBanner(#[prop(into)] notice: Signal<Option<Notice>>) -> impl IntoView {
	move || {
		notice.get().map(|n| {
			view! {
				<div class=n.level.class() role="status">
					<strong>{n.title}</strong>
					<p>{n.description}</p>
				</div>
			}
		})
	}
}
