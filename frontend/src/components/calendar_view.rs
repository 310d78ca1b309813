use chrono::NaiveDate;
use shared::calendar::WEEKDAY_SHORT_DE;
use shared::{CalendarGrid, YearMonth};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CalendarViewProps {
    pub today: NaiveDate,
    pub available_days: Vec<NaiveDate>,
    #[prop_or_default]
    pub booked_days: Vec<NaiveDate>,
    pub selected: Option<NaiveDate>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub on_select: Callback<NaiveDate>,
}

#[function_component(CalendarView)]
pub fn calendar_view(props: &CalendarViewProps) -> Html {
    let month = use_state(|| YearMonth::of(props.selected.unwrap_or(props.today)));

    let grid = CalendarGrid::new(*month, props.today)
        .with_available(props.available_days.iter().copied())
        .with_booked(props.booked_days.iter().copied())
        .with_selected(props.selected)
        .with_bounds(props.min_date, props.max_date);

    let prev_month = {
        let month = month.clone();
        let grid = grid.clone();
        Callback::from(move |_: MouseEvent| {
            let mut grid = grid.clone();
            if grid.go_previous() {
                month.set(grid.month());
            }
        })
    };

    let next_month = {
        let month = month.clone();
        let grid = grid.clone();
        Callback::from(move |_: MouseEvent| {
            let mut grid = grid.clone();
            if grid.go_next() {
                month.set(grid.month());
            }
        })
    };

    html! {
        <div class="calendar-view">
            <div class="calendar-header">
                <button
                    class="calendar-nav"
                    aria-label="Vorheriger Monat"
                    disabled={!grid.can_go_previous()}
                    onclick={prev_month}
                >
                    {"‹"}
                </button>
                <h3 class="calendar-title">{grid.month().title()}</h3>
                <button
                    class="calendar-nav"
                    aria-label="Nächster Monat"
                    disabled={!grid.can_go_next()}
                    onclick={next_month}
                >
                    {"›"}
                </button>
            </div>

            <div class="calendar-weekdays">
                {for WEEKDAY_SHORT_DE.iter().map(|name| html! { <div class="calendar-weekday">{*name}</div> })}
            </div>

            <div class="calendar-grid">
                {for grid.days().into_iter().map(|day| {
                    let mut class = classes!("calendar-day", day.status.css_class());
                    if day.is_today {
                        class.push("today");
                    }
                    if day.is_selected {
                        class.push("selected");
                    }
                    if day.is_other_month {
                        class.push("other-month");
                    }

                    let selectable = day.is_selectable();
                    let onclick = {
                        let on_select = props.on_select.clone();
                        let date = day.date;
                        Callback::from(move |_: MouseEvent| {
                            if selectable {
                                on_select.emit(date);
                            }
                        })
                    };

                    html! {
                        <button class={class} disabled={!selectable} {onclick}>
                            {day.day_of_month()}
                        </button>
                    }
                })}
            </div>
        </div>
    }
}
