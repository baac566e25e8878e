use crate::calendar::shift_month;
use crate::i18n::{Labels, Language, labels};
use crate::models::{BlockNumber, CalendarMonth, DayState, MonthSummary, PreviousStats};
use crate::stats::slot_key;
use std::fmt::Write;

pub struct IndexView<'a> {
    pub language: Language,
    pub calendar: &'a CalendarMonth,
    pub summary: &'a MonthSummary,
    pub previous: &'a PreviousStats,
}

pub fn render_index(view: &IndexView<'_>) -> String {
    let t = labels(view.language);
    let calendar = view.calendar;
    let (prev_year, prev_month) = shift_month(calendar.year, calendar.month, -1);
    let (next_year, next_month) = shift_month(calendar.year, calendar.month, 1);

    INDEX_HTML
        .replace("{{LANG}}", view.language.code())
        .replace("{{TITLE}}", t.title)
        .replace("{{SUBTITLE}}", t.subtitle)
        .replace("{{LANGUAGES}}", &render_languages(view.language, t))
        .replace("{{SUMMARY}}", &render_summary(view.summary, t))
        .replace("{{MONTH_LABEL}}", &format!("{} {}", t.month_name(calendar.month), calendar.year))
        .replace("{{PREV_HREF}}", &format!("/?year={prev_year}&month={prev_month}"))
        .replace("{{NEXT_HREF}}", &format!("/?year={next_year}&month={next_month}"))
        .replace("{{PREV_LABEL}}", t.previous_month)
        .replace("{{NEXT_LABEL}}", t.next_month)
        .replace("{{TODAY_LABEL}}", t.today)
        .replace("{{GRID}}", &render_grid(calendar, t))
        .replace("{{LAST_TIME}}", &render_last_time(view.previous, t))
        .replace("{{SELECT_BLOCK}}", t.select_block)
        .replace("{{BLOCK}}", t.block)
        .replace("{{SESSION_SUMMARY}}", t.session_summary)
        .replace("{{SET}}", t.set)
        .replace("{{WEIGHT}}", t.weight)
        .replace("{{REPS}}", t.reps)
        .replace("{{LAST}}", t.last_time)
        .replace("{{DURATION}}", t.duration)
        .replace("{{START}}", t.start)
        .replace("{{FINISH}}", t.finish)
        .replace("{{SAVE}}", t.save)
        .replace("{{REMOVE}}", t.remove)
        .replace("{{CLOSE}}", t.close)
        .replace("{{FOOTER}}", t.footer)
}

fn render_languages(current: Language, t: &Labels) -> String {
    let mut out = format!(r#"<div class="langs" aria-label="{}">"#, t.language);
    for language in Language::ALL {
        let active = if language == current { " active" } else { "" };
        let _ = write!(
            out,
            r#"<button type="button" class="lang{active}" data-lang="{code}">{upper}</button>"#,
            code = language.code(),
            upper = language.code().to_uppercase(),
        );
    }
    out.push_str("</div>");
    out
}

fn render_summary(summary: &MonthSummary, t: &Labels) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div class="stat"><span class="label">{report}</span><span class="value" id="total-workouts">{total}</span><span class="hint">{sessions} / {days_in_month} {days}</span></div>"#,
        report = t.monthly_report,
        total = summary.total_workouts,
        sessions = t.sessions,
        days_in_month = summary.days_in_month,
        days = t.days,
    );

    let _ = write!(
        out,
        r#"<div class="stat wide"><span class="label">{}</span><div class="bests">"#,
        t.personal_bests
    );
    for block in BlockNumber::ALL {
        for exercise in ['a', 'b'] {
            let key = slot_key(block, exercise);
            let value = summary
                .personal_bests
                .get(&key)
                .map(|set| format!("{} x {}", set.weight, set.reps))
                .unwrap_or_else(|| "-".to_string());
            let _ = write!(
                out,
                r#"<div class="best" data-slot="{key}"><span>{block_label} {block} {upper}</span><strong>{value}</strong></div>"#,
                block_label = t.block,
                upper = exercise.to_ascii_uppercase(),
            );
        }
    }
    out.push_str("</div></div>");
    out
}

fn render_grid(calendar: &CalendarMonth, t: &Labels) -> String {
    let mut out = String::new();
    for weekday in t.weekdays {
        let _ = write!(out, r#"<div class="weekday">{weekday}</div>"#);
    }
    for _ in 0..calendar.leading_blanks {
        out.push_str(r#"<div class="day empty"></div>"#);
    }
    for day in &calendar.days {
        render_day(&mut out, day, t);
    }
    out
}

fn render_day(out: &mut String, day: &DayState, t: &Labels) {
    let mut classes = String::from("day");
    if day.is_today {
        classes.push_str(" today");
    }
    if day.is_completed {
        classes.push_str(" completed");
    }
    if day.is_rest_day {
        classes.push_str(" rest");
    }

    let badge = match (day.is_completed, day.block_number, day.is_rest_day) {
        (true, Some(block), _) => format!("{} {block}", t.block),
        (_, _, true) => t.rest.to_string(),
        _ if day.is_today => t.today.to_string(),
        _ => String::new(),
    };

    let _ = write!(
        out,
        r#"<button type="button" class="{classes}" data-date="{date}"><span class="num">{num}</span><span class="badge">{badge}</span></button>"#,
        date = day.date,
        num = day.day,
    );
}

fn render_last_time(previous: &PreviousStats, t: &Labels) -> String {
    let mut out = String::new();
    for (block, stats) in previous {
        let _ = write!(out, r#"<div class="last" data-block="{block}"><span>{} {block}</span>"#, t.block);
        for (exercise, sets) in [("A", &stats.exercise_a), ("B", &stats.exercise_b)] {
            let joined = sets
                .iter()
                .map(|set| format!("{}x{}", set.weight, set.reps))
                .collect::<Vec<_>>()
                .join(" · ");
            let _ = write!(out, "<small>{exercise}: {joined}</small>");
        }
        out.push_str("</div>");
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="{{LANG}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f1f4f8;
      --ink: #1e293b;
      --muted: #94a3b8;
      --card: #ffffff;
      --done: #10b981;
      --rest: #f59e0b;
      --accent: #0f172a;
      --shadow: 0 18px 40px rgba(15, 23, 42, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Helvetica Neue", sans-serif;
      padding: 24px 14px 40px;
    }

    .app {
      width: min(900px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 20px;
    }

    nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    nav h1 {
      margin: 0;
      font-size: 1.3rem;
      font-weight: 900;
      letter-spacing: -0.02em;
    }

    nav p {
      margin: 2px 0 0;
      font-size: 0.65rem;
      text-transform: uppercase;
      letter-spacing: 0.2em;
      color: var(--muted);
    }

    .langs {
      display: flex;
      gap: 4px;
      padding: 4px;
      background: #e2e8f0;
      border-radius: 12px;
    }

    .lang {
      border: none;
      background: transparent;
      border-radius: 8px;
      padding: 4px 8px;
      font-size: 0.65rem;
      font-weight: 700;
      color: var(--muted);
      cursor: pointer;
    }

    .lang.active {
      background: white;
      color: var(--accent);
    }

    .summary {
      display: grid;
      grid-template-columns: minmax(160px, 1fr) 3fr;
      gap: 14px;
    }

    .stat {
      background: var(--card);
      border-radius: 24px;
      padding: 18px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 6px;
    }

    .label {
      font-size: 0.7rem;
      text-transform: uppercase;
      letter-spacing: 0.14em;
      color: var(--muted);
    }

    .value {
      font-size: 2rem;
      font-weight: 800;
    }

    .hint {
      font-size: 0.75rem;
      color: var(--muted);
    }

    .bests {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(110px, 1fr));
      gap: 8px;
    }

    .best {
      display: grid;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .best strong {
      color: var(--ink);
      font-size: 1rem;
    }

    main {
      background: var(--card);
      border-radius: 32px;
      padding: 20px;
      box-shadow: var(--shadow);
    }

    .month-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 14px;
    }

    .month-header h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .month-header a {
      color: var(--accent);
      text-decoration: none;
      font-weight: 700;
      padding: 6px 10px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .weekday {
      text-align: center;
      font-size: 0.65rem;
      font-weight: 800;
      text-transform: uppercase;
      color: #cbd5e1;
      padding: 8px 0;
    }

    .day {
      aspect-ratio: 1;
      border: 1px solid #e2e8f0;
      border-radius: 16px;
      background: white;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
      gap: 2px;
      cursor: pointer;
      font: inherit;
      color: inherit;
    }

    .day.empty {
      border: none;
      cursor: default;
    }

    .day.today {
      border-color: var(--accent);
      border-width: 2px;
    }

    .day.completed {
      background: var(--done);
      border-color: var(--done);
      color: white;
    }

    .day.rest {
      background: #fef3c7;
      border-color: var(--rest);
    }

    .num {
      font-weight: 800;
    }

    .badge {
      font-size: 0.55rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
    }

    .lasts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 10px;
      margin-top: 16px;
    }

    .last {
      display: grid;
      gap: 2px;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .last span {
      color: var(--ink);
      font-weight: 700;
    }

    dialog {
      border: none;
      border-radius: 28px;
      padding: 24px;
      width: min(520px, 96vw);
      box-shadow: var(--shadow);
    }

    dialog h3 {
      margin: 0 0 12px;
    }

    .blocks {
      display: flex;
      gap: 8px;
      margin-bottom: 14px;
    }

    .blocks label {
      flex: 1;
      text-align: center;
      border: 1px solid #e2e8f0;
      border-radius: 12px;
      padding: 8px;
      cursor: pointer;
    }

    .sets {
      display: grid;
      gap: 6px;
      margin-bottom: 12px;
    }

    .set-row {
      display: grid;
      grid-template-columns: 60px 1fr 1fr;
      gap: 6px;
      align-items: center;
      font-size: 0.8rem;
    }

    .set-row input,
    .duration input {
      width: 100%;
      padding: 6px 8px;
      border: 1px solid #e2e8f0;
      border-radius: 8px;
      font: inherit;
    }

    .timer {
      display: flex;
      gap: 8px;
      align-items: end;
      margin-bottom: 12px;
    }

    .timer .duration {
      flex: 1;
    }

    .btn-timer {
      padding: 8px 14px;
      border: none;
      border-radius: 12px;
      background: #0f172a;
      color: #fff;
      font-weight: 700;
      cursor: pointer;
    }

    .btn-timer.running {
      background: #dc2626;
    }

    .actions {
      display: flex;
      gap: 8px;
      justify-content: flex-end;
      margin-top: 16px;
    }

    .actions button {
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 700;
      cursor: pointer;
    }

    .btn-save {
      background: var(--accent);
      color: white;
    }

    .btn-remove {
      background: #fee2e2;
      color: #b91c1c;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    footer {
      text-align: center;
      font-size: 0.65rem;
      color: var(--muted);
    }

    @media (max-width: 600px) {
      .summary {
        grid-template-columns: 1fr;
      }
      .day {
        border-radius: 10px;
      }
    }
  </style>
</head>
<body>
  <div class="app">
    <nav>
      <div>
        <h1>{{TITLE}}</h1>
        <p>{{SUBTITLE}}</p>
      </div>
      {{LANGUAGES}}
    </nav>

    <section class="summary">{{SUMMARY}}</section>

    <main>
      <div class="month-header">
        <a href="{{PREV_HREF}}" aria-label="{{PREV_LABEL}}">&larr;</a>
        <h2>{{MONTH_LABEL}}</h2>
        <div>
          <a href="/">{{TODAY_LABEL}}</a>
          <a href="{{NEXT_HREF}}" aria-label="{{NEXT_LABEL}}">&rarr;</a>
        </div>
      </div>
      <div class="grid">{{GRID}}</div>
      <div class="lasts">{{LAST_TIME}}</div>
    </main>

    <div class="status" id="status"></div>
    <footer>{{FOOTER}}</footer>
  </div>

  <dialog id="editor">
    <form id="editor-form" method="dialog">
      <h3 id="editor-date"></h3>
      <p class="label">{{SELECT_BLOCK}}</p>
      <div class="blocks">
        <label><input type="radio" name="block" value="1" /> {{BLOCK}} 1</label>
        <label><input type="radio" name="block" value="2" /> {{BLOCK}} 2</label>
        <label><input type="radio" name="block" value="3" /> {{BLOCK}} 3</label>
      </div>
      <p class="label">{{SESSION_SUMMARY}}</p>
      <div class="sets" id="sets-a"></div>
      <div class="sets" id="sets-b"></div>
      <div class="timer">
        <label class="duration">{{DURATION}} <input type="number" min="0" id="duration" value="0" /></label>
        <button type="button" class="btn-timer" id="timer-btn">{{START}}</button>
      </div>
      <div class="actions">
        <button type="button" class="btn-remove" id="remove-btn">{{REMOVE}}</button>
        <button type="button" id="close-btn">{{CLOSE}}</button>
        <button type="submit" class="btn-save">{{SAVE}}</button>
      </div>
    </form>
  </dialog>

  <script>
    const editor = document.getElementById('editor');
    const form = document.getElementById('editor-form');
    const statusEl = document.getElementById('status');
    const dateEl = document.getElementById('editor-date');
    const durationEl = document.getElementById('duration');
    const removeBtn = document.getElementById('remove-btn');
    const timerBtn = document.getElementById('timer-btn');
    const labels = {
      set: '{{SET}}',
      weight: '{{WEIGHT}}',
      reps: '{{REPS}}',
      last: '{{LAST}}',
      start: '{{START}}',
      finish: '{{FINISH}}'
    };

    let selectedDate = null;
    // Seconds measured by the timer; null when the minutes field was typed by hand.
    let timedSeconds = null;
    let timerStartedAt = null;
    let timerTick = null;

    const elapsedSeconds = () => (Date.now() - timerStartedAt) / 1000;

    const stopTimer = () => {
      clearInterval(timerTick);
      timerTick = null;
      timerStartedAt = null;
      timerBtn.textContent = labels.start;
      timerBtn.classList.remove('running');
    };

    timerBtn.addEventListener('click', () => {
      if (timerStartedAt === null) {
        timedSeconds = null;
        timerStartedAt = Date.now();
        timerBtn.textContent = labels.finish;
        timerBtn.classList.add('running');
        timerTick = setInterval(() => {
          durationEl.value = Math.floor(elapsedSeconds() / 60);
        }, 1000);
        return;
      }
      timedSeconds = Math.round(elapsedSeconds());
      stopTimer();
      durationEl.value = Math.round(timedSeconds / 60);
    });

    durationEl.addEventListener('input', () => {
      timedSeconds = null;
    });

    const submittedDuration = () => {
      if (timerStartedAt !== null) {
        timedSeconds = Math.round(elapsedSeconds());
        stopTimer();
      }
      if (timedSeconds !== null) {
        return timedSeconds;
      }
      return Math.max(0, Math.round(Number(durationEl.value) * 60));
    };

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const renderSets = (containerId, exercise, sets, lastSets) => {
      const container = document.getElementById(containerId);
      container.innerHTML = sets
        .map((set, index) => {
          const last = lastSets[index];
          const hint = last ? `${labels.last}: ${last.weight}x${last.reps}` : '';
          return `<div class="set-row" data-exercise="${exercise}">
            <span>${exercise} · ${labels.set} ${index + 1}</span>
            <input type="number" step="0.5" name="weight" value="${set.weight}" aria-label="${labels.weight}" title="${hint}" />
            <input type="number" step="1" name="reps" value="${set.reps}" aria-label="${labels.reps}" title="${hint}" />
          </div>`;
        })
        .join('');
    };

    const readSets = (containerId) =>
      Array.from(document.querySelectorAll(`#${containerId} .set-row`)).map((row) => ({
        weight: Number(row.querySelector('[name="weight"]').value) || 0,
        reps: Math.trunc(Number(row.querySelector('[name="reps"]').value) || 0)
      }));

    const loadDraft = async (date, block) => {
      const query = block ? `?block=${block}` : '';
      const res = await fetch(`/api/workouts/${date}${query}`);
      if (!res.ok) {
        throw new Error(await res.text());
      }
      const draft = await res.json();
      selectedDate = date;
      dateEl.textContent = date;
      form.querySelector(`input[name="block"][value="${draft.blockNumber}"]`).checked = true;
      renderSets('sets-a', 'A', draft.exerciseA, draft.lastTime.exerciseA);
      renderSets('sets-b', 'B', draft.exerciseB, draft.lastTime.exerciseB);
      if (timerStartedAt === null) {
        timedSeconds = null;
        durationEl.value = Math.round((draft.duration || 0) / 60);
      }
      removeBtn.hidden = !draft.isCompleted;
      return draft;
    };

    document.querySelectorAll('.day[data-date]').forEach((cell) => {
      cell.addEventListener('click', () => {
        loadDraft(cell.dataset.date)
          .then(() => editor.showModal())
          .catch((err) => setStatus(err.message, 'error'));
      });
    });

    form.querySelectorAll('input[name="block"]').forEach((radio) => {
      radio.addEventListener('change', () => {
        if (removeBtn.hidden) {
          loadDraft(selectedDate, radio.value).catch((err) => setStatus(err.message, 'error'));
        }
      });
    });

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const block = Number(form.querySelector('input[name="block"]:checked').value);
      const res = await fetch(`/api/workouts/${selectedDate}`, {
        method: 'PUT',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({
          blockNumber: block,
          exerciseA: readSets('sets-a'),
          exerciseB: readSets('sets-b'),
          duration: submittedDuration()
        })
      });
      if (!res.ok) {
        setStatus(await res.text(), 'error');
        return;
      }
      window.location.reload();
    });

    removeBtn.addEventListener('click', async () => {
      const res = await fetch(`/api/workouts/${selectedDate}`, { method: 'DELETE' });
      if (!res.ok) {
        setStatus(await res.text(), 'error');
        return;
      }
      window.location.reload();
    });

    document.getElementById('close-btn').addEventListener('click', () => editor.close());

    document.querySelectorAll('.lang').forEach((button) => {
      button.addEventListener('click', async () => {
        const res = await fetch('/api/language', {
          method: 'PUT',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ language: button.dataset.lang })
        });
        if (!res.ok) {
          setStatus(await res.text(), 'error');
          return;
        }
        window.location.reload();
      });
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::calendar_month_at;
    use crate::models::{ExerciseSet, ProgressData, WorkoutEntry};
    use crate::stats::{month_summary_in, previous_stats};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn render(language: Language, data: &ProgressData) -> String {
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let calendar = calendar_month_at(today, 2026, 10, data).unwrap();
        let summary = month_summary_in(data, 2026, 10, &Utc);
        let previous = previous_stats(data);
        render_index(&IndexView {
            language,
            calendar: &calendar,
            summary: &summary,
            previous: &previous,
        })
    }

    #[test]
    fn page_has_no_unfilled_placeholders() {
        let html = render(Language::Pl, &ProgressData::new());
        assert!(!html.contains("{{"), "placeholder left in page");
        assert!(html.contains("TRENING BLOKOWY"));
        assert!(html.contains(r#"href="/?year=2026&month=9""#));
        assert!(html.contains(r#"href="/?year=2026&month=11""#));
        assert_eq!(html.matches(r#"class="day empty""#).count(), 4);
        assert!(html.contains("Październik 2026"));
        assert!(html.contains(r#"id="timer-btn">START</button>"#));
        assert!(html.contains("finish: 'KONIEC'"));
    }

    #[test]
    fn month_header_uses_language_month_name() {
        let data = ProgressData::new();
        assert!(render(Language::En, &data).contains("October 2026"));
        assert!(render(Language::Ru, &data).contains("Октябрь 2026"));
        assert!(!render(Language::En, &data).contains("2026-10<"));
    }

    #[test]
    fn completed_and_rest_days_are_marked() {
        let mut data = ProgressData::new();
        data.insert(
            "2026-10-5".to_string(),
            WorkoutEntry {
                completed: true,
                block_number: BlockNumber::Two,
                exercise_a: vec![ExerciseSet::new(62.5, 8); 3],
                exercise_b: vec![ExerciseSet::new(30.0, 12); 3],
                date: Utc.with_ymd_and_hms(2026, 10, 5, 0, 0, 0).unwrap(),
                duration: Some(1500.0),
            },
        );

        let html = render(Language::En, &data);
        assert!(html.contains(
            r#"<button type="button" class="day completed" data-date="2026-10-05"><span class="num">5</span><span class="badge">Block 2</span></button>"#
        ));
        assert!(html.contains(r#"class="day rest" data-date="2026-10-06""#));
        assert!(html.contains(r#"class="day today" data-date="2026-10-14""#));
        assert!(html.contains("<strong>62.5 x 8</strong>"));
    }
}
