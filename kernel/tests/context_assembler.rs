use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc, Weekday};
use kernel::{
    assembler::ContextAssembler,
    collaborator::pricing::PriceTable,
    model::{
        calendar::MonthYear,
        context::DayStatus,
        id::{ReservationId, ScheduleId, UserId},
        reservation::{
            event::{BookBatch, ReleaseBatch},
            Reservation, ReservationStatus,
        },
        role::Role,
        schedule::{
            event::{CreateSchedule, UpdateSchedule},
            Schedule,
        },
    },
    repository::{reservation::ReservationRepository, schedule::ScheduleRepository},
};
use shared::error::{AppError, AppResult};
use std::sync::Arc;

struct FixedSchedules(Vec<Schedule>);

#[async_trait]
impl ScheduleRepository for FixedSchedules {
    async fn create(&self, _event: CreateSchedule) -> AppResult<ScheduleId> {
        unimplemented!("not exercised by these tests")
    }

    async fn find_active(&self) -> AppResult<Vec<Schedule>> {
        Ok(self.0.iter().filter(|s| s.is_active).cloned().collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Schedule>> {
        Ok(self.0.clone())
    }

    async fn find_by_id(&self, schedule_id: ScheduleId) -> AppResult<Option<Schedule>> {
        Ok(self.0.iter().find(|s| s.id == schedule_id).cloned())
    }

    async fn update(&self, _event: UpdateSchedule) -> AppResult<()> {
        unimplemented!("not exercised by these tests")
    }

    async fn deactivate(&self, _schedule_id: ScheduleId) -> AppResult<()> {
        unimplemented!("not exercised by these tests")
    }
}

struct FixedReservations {
    reservations: Vec<Reservation>,
    pending_refunds: i64,
}

#[async_trait]
impl ReservationRepository for FixedReservations {
    async fn book_batch(&self, _event: BookBatch) -> AppResult<Vec<ReservationId>> {
        unimplemented!("not exercised by these tests")
    }

    async fn release_batch(&self, _event: ReleaseBatch) -> AppResult<u64> {
        unimplemented!("not exercised by these tests")
    }

    async fn find_for_schedule_in_month(
        &self,
        schedule_id: ScheduleId,
        month: MonthYear,
    ) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.schedule_id == schedule_id && month.contains(r.date))
            .cloned()
            .collect())
    }

    async fn find_by_user_in_month(
        &self,
        user_id: UserId,
        month: MonthYear,
    ) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.user_id == user_id && month.contains(r.date))
            .cloned()
            .collect())
    }

    async fn count_pending_refunds(&self, _user_id: UserId) -> AppResult<i64> {
        Ok(self.pending_refunds)
    }
}

struct FlatPrices;

#[async_trait]
impl PriceTable for FlatPrices {
    async fn price_per_session(&self, role: Role) -> AppResult<i64> {
        Ok(match role {
            Role::Visitor => 2500,
            _ => 1500,
        })
    }
}

fn monday_schedule(capacity: i32) -> Schedule {
    Schedule {
        id: ScheduleId::new(),
        weekday: Weekday::Mon,
        starts_at: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        ends_at: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        max_capacity: capacity,
        lane_count: 2,
        is_active: true,
    }
}

fn reservation(
    schedule: &Schedule,
    user_id: UserId,
    date: NaiveDate,
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        id: ReservationId::new(),
        user_id,
        schedule_id: schedule.id,
        date,
        status,
        is_paid: false,
        amount: 1500,
        payment_method: None,
        refund_pending: false,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn assembler(
    schedules: Vec<Schedule>,
    reservations: Vec<Reservation>,
    pending_refunds: i64,
) -> ContextAssembler {
    ContextAssembler::new(
        Arc::new(FixedSchedules(schedules)),
        Arc::new(FixedReservations {
            reservations,
            pending_refunds,
        }),
        Arc::new(FlatPrices),
        7,
        2,
    )
}

// One active Monday-only schedule of capacity 3 in February 2026 and one
// existing reservation held by the user: the context lists exactly the
// Mondays of the month, the user's day is RESERVED, everything else OPEN.
#[tokio::test]
async fn february_context_marks_the_users_monday() {
    let schedule = monday_schedule(3);
    let user = UserId::new();
    let mine = reservation(&schedule, user, day(2026, 2, 9), ReservationStatus::Confirmed);
    let assembler = assembler(vec![schedule.clone()], vec![mine], 0);

    let month = MonthYear::parse("2026-02").unwrap();
    let ctx = assembler
        .assemble(user, Role::Member, month, day(2026, 2, 1))
        .await
        .unwrap();

    let dates: Vec<_> = ctx.days.iter().map(|e| e.state.date).collect();
    assert_eq!(
        dates,
        vec![day(2026, 2, 2), day(2026, 2, 9), day(2026, 2, 16), day(2026, 2, 23)]
    );
    for entry in &ctx.days {
        assert_eq!(entry.state.total_capacity, 3);
        if entry.state.date == day(2026, 2, 9) {
            assert_eq!(entry.status, DayStatus::Reserved);
            assert_eq!(entry.state.reserved_spots, 1);
            assert_eq!(entry.state.available_spots, 2);
        } else {
            assert_eq!(entry.status, DayStatus::Open);
            assert_eq!(entry.state.reserved_spots, 0);
            assert!(!entry.state.is_full);
        }
    }
    assert_eq!(ctx.price_per_session, 1500);
    assert_eq!(ctx.pricing.visitor, 2500);
    assert_eq!(ctx.pending_refunds, 0);
}

#[tokio::test]
async fn full_days_are_marked_full_for_other_users() {
    let schedule = monday_schedule(1);
    let stranger = UserId::new();
    let taken = reservation(
        &schedule,
        stranger,
        day(2026, 2, 2),
        ReservationStatus::Confirmed,
    );
    let assembler = assembler(vec![schedule], vec![taken], 0);

    let ctx = assembler
        .assemble(
            UserId::new(),
            Role::Visitor,
            MonthYear::parse("2026-02").unwrap(),
            day(2026, 2, 1),
        )
        .await
        .unwrap();

    let first = &ctx.days[0];
    assert_eq!(first.state.date, day(2026, 2, 2));
    assert_eq!(first.status, DayStatus::Full);
    assert!(first.state.is_full);
    assert_eq!(ctx.price_per_session, 2500);
}

#[tokio::test]
async fn cancelled_reservations_do_not_occupy_the_calendar() {
    let schedule = monday_schedule(1);
    let user = UserId::new();
    let cancelled = reservation(
        &schedule,
        user,
        day(2026, 2, 2),
        ReservationStatus::Cancelled,
    );
    let assembler = assembler(vec![schedule], vec![cancelled], 1);

    let ctx = assembler
        .assemble(user, Role::Member, MonthYear::parse("2026-02").unwrap(), day(2026, 2, 1))
        .await
        .unwrap();

    let first = &ctx.days[0];
    assert_eq!(first.status, DayStatus::Open);
    assert_eq!(first.state.reserved_spots, 0);
    assert_eq!(ctx.pending_refunds, 1);
}

#[tokio::test]
async fn window_flag_follows_the_end_of_month() {
    let assembler = assembler(vec![monday_schedule(2)], vec![], 0);
    let month = MonthYear::parse("2026-02").unwrap();

    let early = assembler
        .assemble(UserId::new(), Role::Member, month, day(2026, 2, 10))
        .await
        .unwrap();
    assert!(!early.can_reserve_next_month);

    let late = assembler
        .assemble(UserId::new(), Role::Member, month, day(2026, 2, 25))
        .await
        .unwrap();
    assert!(late.can_reserve_next_month);
}

#[tokio::test]
async fn months_too_far_away_are_rejected() {
    let assembler = assembler(vec![], vec![], 0);
    let err = assembler
        .assemble(
            UserId::new(),
            Role::Member,
            MonthYear::parse("2026-08").unwrap(),
            day(2026, 2, 1),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidMonth(_)));
}
