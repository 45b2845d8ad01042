use leptos::{ev::MouseEvent, *};

use super::repository;
use crate::{
    api::{ApiClient, ApiError, Employee, EmployeePayload, MonthlyHoursRow, RouteInfo},
    state::clock::{self, ClockEventKind, ShiftsState},
    state::session::use_session,
    utils::time,
};

type ProfileResult = Result<Employee, ApiError>;

#[derive(Clone, Copy)]
pub struct EmployeeDashboardViewModel {
    pub profile_resource: Resource<(), ProfileResult>,
    pub routes_resource: Resource<Option<ProfileResult>, Result<Vec<RouteInfo>, ApiError>>,
    pub hours_resource: Resource<Option<ProfileResult>, Result<Vec<MonthlyHoursRow>, ApiError>>,
    pub shifts: (ReadSignal<ShiftsState>, WriteSignal<ShiftsState>),
    pub clock_action: Action<ClockEventKind, Result<(), ApiError>>,
    pub clock_feedback: RwSignal<Option<Result<String, ApiError>>>,
    pub last_clock_event: RwSignal<Option<ClockEventKind>>,
    pub edit_open: RwSignal<bool>,
    pub update_action: Action<EmployeePayload, Result<(), ApiError>>,
    pub update_error: RwSignal<Option<ApiError>>,
}

impl EmployeeDashboardViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_default();
        let (session, _) = use_session();
        let (shifts_read, shifts_write) = clock::use_shifts();

        let api_clone = api.clone();
        let profile_resource = create_resource(
            || (),
            move |_| {
                let api = api_clone.clone();
                let user_id = session.get_untracked().user_id;
                async move {
                    let user_id = user_id.ok_or_else(|| {
                        ApiError::unauthorized("Session does not contain a user id")
                    })?;
                    repository::fetch_profile(&api, user_id).await
                }
            },
        );

        let api_clone = api.clone();
        let routes_resource = create_resource(
            move || profile_resource.get(),
            move |profile| {
                let api = api_clone.clone();
                async move {
                    match profile {
                        Some(Ok(employee)) => {
                            repository::fetch_routes(&api, employee.employee_id).await
                        }
                        _ => Ok(Vec::new()),
                    }
                }
            },
        );

        let api_clone = api.clone();
        let hours_resource = create_resource(
            move || profile_resource.get(),
            move |profile| {
                let api = api_clone.clone();
                async move {
                    match profile {
                        Some(Ok(employee)) => {
                            repository::fetch_work_hours(&api, employee.employee_id, time::today())
                                .await
                        }
                        _ => Ok(Vec::new()),
                    }
                }
            },
        );

        let api_clone = api.clone();
        let clock_action = create_action(move |kind: &ClockEventKind| {
            let api = api_clone.clone();
            let kind = *kind;
            async move {
                match kind {
                    ClockEventKind::ClockIn => clock::clock_in(&api, shifts_read, shifts_write).await,
                    ClockEventKind::ClockOut => {
                        clock::clock_out(&api, shifts_read, shifts_write).await
                    }
                }
            }
        });

        let clock_feedback = create_rw_signal(None);
        let last_clock_event = create_rw_signal(None);
        {
            create_effect(move |_| {
                if let Some(result) = clock_action.value().get() {
                    match result {
                        Ok(()) => {
                            let message = match last_clock_event.get_untracked() {
                                Some(ClockEventKind::ClockIn) => "Clocked in",
                                Some(ClockEventKind::ClockOut) => "Clocked out",
                                None => "Done",
                            };
                            clock_feedback.set(Some(Ok(message.to_string())));
                        }
                        Err(err) => clock_feedback.set(Some(Err(err))),
                    }
                }
            });
        }

        let edit_open = create_rw_signal(false);
        let update_error = create_rw_signal(None::<ApiError>);
        let api_clone = api.clone();
        let update_action = create_action(move |payload: &EmployeePayload| {
            let api = api_clone.clone();
            let payload = payload.clone();
            async move {
                let employee_id = profile_resource
                    .get()
                    .and_then(|p| p.ok())
                    .map(|employee| employee.employee_id)
                    .ok_or_else(|| ApiError::validation("Profile is not loaded yet"))?;
                api.update_employee(employee_id, &payload).await?;
                profile_resource.refetch();
                Ok(())
            }
        });
        {
            create_effect(move |_| {
                if let Some(result) = update_action.value().get() {
                    match result {
                        Ok(()) => {
                            update_error.set(None);
                            edit_open.set(false);
                        }
                        Err(err) => update_error.set(Some(err)),
                    }
                }
            });
        }

        {
            let api = api.clone();
            create_effect(move |_| {
                let api = api.clone();
                spawn_local(async move {
                    let _ = clock::load_shifts(&api, shifts_write).await;
                });
            });
        }

        Self {
            profile_resource,
            routes_resource,
            hours_resource,
            shifts: (shifts_read, shifts_write),
            clock_action,
            clock_feedback,
            last_clock_event,
            edit_open,
            update_action,
            update_error,
        }
    }

    pub fn handle_clock_in(&self) -> impl Fn(MouseEvent) {
        let clock_action = self.clock_action;
        let clock_feedback = self.clock_feedback;
        let last_event = self.last_clock_event;
        move |_| {
            if clock_action.pending().get_untracked() {
                return;
            }
            clock_feedback.set(None);
            last_event.set(Some(ClockEventKind::ClockIn));
            clock_action.dispatch(ClockEventKind::ClockIn);
        }
    }

    pub fn handle_clock_out(&self) -> impl Fn(MouseEvent) {
        let clock_action = self.clock_action;
        let clock_feedback = self.clock_feedback;
        let last_event = self.last_clock_event;
        move |_| {
            if clock_action.pending().get_untracked() {
                return;
            }
            clock_feedback.set(None);
            last_event.set(Some(ClockEventKind::ClockOut));
            clock_action.dispatch(ClockEventKind::ClockOut);
        }
    }
}

pub fn use_employee_dashboard_view_model() -> EmployeeDashboardViewModel {
    match use_context::<EmployeeDashboardViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = EmployeeDashboardViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
