pub mod filters;

use self::filters::{
    AppointmentFilter, AppointmentSort, AttendeeSort, DoctorFilter, DoctorSort, EventSort,
    MedicalRecordFilter, MedicalRecordSort, PatientFilter, PatientSort, SortOrder,
};
use crate::database::get_db_conn;
use crate::handlers::commands::{
    CreateEventCommand, CreatePatientCommand, UpdateAttendeeStatusCommand, UpdateEventCommand,
};
use crate::handlers::dto::{
    AppointmentDto, AttendeeDto, DoctorDto, EventDto, MedicalRecordDto, PatientDto,
};
use crate::handlers::{
    attendees as attendee_handlers, events as event_handlers, patients as patient_handlers,
};
use crate::mailer::Mailer;
use crate::models::enums::AttendeeStatus;
use crate::repository::{
    AppointmentRepository, AttendeeRepository, DoctorRepository, MedicalRecordRepository,
    PatientRepository,
};
use crate::DbPool;
use actix_web::{web, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql::{Context, EmptySubscription, Object, Schema};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use chrono::NaiveDateTime;
use std::sync::Arc;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(pool: DbPool, mailer: Arc<Mailer>) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .data(mailer)
        .finish()
}

pub async fn graphql_handler(schema: web::Data<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

fn internal(err: anyhow::Error) -> async_graphql::Error {
    log::error!("graphql request failed: {:#}", err);
    async_graphql::Error::new(err.to_string())
}

fn invalid(err: anyhow::Error) -> async_graphql::Error {
    async_graphql::Error::new(err.to_string())
}

async fn blocking<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> diesel::QueryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let res = web::block(f).await??;
    Ok(res)
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn patients(
        &self,
        ctx: &Context<'_>,
        filter: Option<PatientFilter>,
        sort_by: Option<PatientSort>,
        order: Option<SortOrder>,
    ) -> async_graphql::Result<Vec<PatientDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mut conn = get_db_conn(pool).map_err(internal)?;
        let mut rows = blocking(move || match filter {
            Some(filter) => PatientRepository::find(&mut conn, move |p| filter.matches(p)),
            None => PatientRepository::get_all(&mut conn),
        })
        .await
        .map_err(internal)?;
        if let Some(key) = sort_by {
            filters::sort_patients(&mut rows, key, order.unwrap_or_default());
        }
        Ok(rows.into_iter().map(PatientDto::from).collect())
    }

    async fn patient(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Option<PatientDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        patient_handlers::get_patient(pool, id).await.map_err(internal)
    }

    async fn doctors(
        &self,
        ctx: &Context<'_>,
        filter: Option<DoctorFilter>,
        sort_by: Option<DoctorSort>,
        order: Option<SortOrder>,
    ) -> async_graphql::Result<Vec<DoctorDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mut conn = get_db_conn(pool).map_err(internal)?;
        let mut rows = blocking(move || match filter {
            Some(filter) => DoctorRepository::find(&mut conn, move |d| filter.matches(d)),
            None => DoctorRepository::get_all(&mut conn),
        })
        .await
        .map_err(internal)?;
        if let Some(key) = sort_by {
            filters::sort_doctors(&mut rows, key, order.unwrap_or_default());
        }
        Ok(rows.into_iter().map(DoctorDto::from).collect())
    }

    async fn doctor(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Option<DoctorDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mut conn = get_db_conn(pool).map_err(internal)?;
        let row = blocking(move || DoctorRepository::get_by_id(&mut conn, &id))
            .await
            .map_err(internal)?;
        Ok(row.map(DoctorDto::from))
    }

    async fn appointments(
        &self,
        ctx: &Context<'_>,
        filter: Option<AppointmentFilter>,
        sort_by: Option<AppointmentSort>,
        order: Option<SortOrder>,
    ) -> async_graphql::Result<Vec<AppointmentDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mut conn = get_db_conn(pool).map_err(internal)?;
        let mut rows = blocking(move || match filter {
            Some(filter) => AppointmentRepository::find(&mut conn, move |a| filter.matches(a)),
            None => AppointmentRepository::get_all(&mut conn),
        })
        .await
        .map_err(internal)?;
        if let Some(key) = sort_by {
            filters::sort_appointments(&mut rows, key, order.unwrap_or_default());
        }
        Ok(rows.into_iter().map(AppointmentDto::from).collect())
    }

    async fn appointment(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Option<AppointmentDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mut conn = get_db_conn(pool).map_err(internal)?;
        let row = blocking(move || AppointmentRepository::get_by_id(&mut conn, &id))
            .await
            .map_err(internal)?;
        Ok(row.map(AppointmentDto::from))
    }

    async fn medical_records(
        &self,
        ctx: &Context<'_>,
        filter: Option<MedicalRecordFilter>,
        sort_by: Option<MedicalRecordSort>,
        order: Option<SortOrder>,
    ) -> async_graphql::Result<Vec<MedicalRecordDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mut conn = get_db_conn(pool).map_err(internal)?;
        let mut rows = blocking(move || match filter {
            Some(filter) => MedicalRecordRepository::find(&mut conn, move |m| filter.matches(m)),
            None => MedicalRecordRepository::get_all(&mut conn),
        })
        .await
        .map_err(internal)?;
        if let Some(key) = sort_by {
            filters::sort_medical_records(&mut rows, key, order.unwrap_or_default());
        }
        Ok(rows.into_iter().map(MedicalRecordDto::from).collect())
    }

    async fn medical_record(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Option<MedicalRecordDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mut conn = get_db_conn(pool).map_err(internal)?;
        let row = blocking(move || MedicalRecordRepository::get_by_id(&mut conn, &id))
            .await
            .map_err(internal)?;
        Ok(row.map(MedicalRecordDto::from))
    }

    /// Same filtering as the REST list endpoint: search term wins over date
    /// range, which wins over an unfiltered scan. Sorting defaults to start
    /// time when only an order is given.
    async fn events(
        &self,
        ctx: &Context<'_>,
        start_date: Option<NaiveDateTime>,
        end_date: Option<NaiveDateTime>,
        search_term: Option<String>,
        sort_by: Option<EventSort>,
        order: Option<SortOrder>,
    ) -> async_graphql::Result<Vec<EventDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mut rows = event_handlers::get_events(pool, start_date, end_date, search_term)
            .await
            .map_err(internal)?;
        if sort_by.is_some() || order.is_some() {
            filters::sort_events(
                &mut rows,
                sort_by.unwrap_or(EventSort::StartTime),
                order.unwrap_or_default(),
            );
        }
        Ok(rows)
    }

    async fn event(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Option<EventDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        event_handlers::get_event(pool, id).await.map_err(internal)
    }

    async fn attendees(
        &self,
        ctx: &Context<'_>,
        event_id: Option<String>,
        status: Option<AttendeeStatus>,
        sort_by: Option<AttendeeSort>,
        order: Option<SortOrder>,
    ) -> async_graphql::Result<Vec<AttendeeDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mut conn = get_db_conn(pool).map_err(internal)?;
        let mut rows = blocking(move || match event_id {
            Some(event_id) => AttendeeRepository::by_event(&mut conn, &event_id),
            None => AttendeeRepository::get_all(&mut conn),
        })
        .await
        .map_err(internal)?;
        if let Some(status) = status {
            rows.retain(|a| a.status == status);
        }
        if let Some(key) = sort_by {
            filters::sort_attendees(&mut rows, key, order.unwrap_or_default());
        }
        Ok(rows.into_iter().map(AttendeeDto::from).collect())
    }

    async fn attendee(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Option<AttendeeDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mut conn = get_db_conn(pool).map_err(internal)?;
        let row = blocking(move || AttendeeRepository::get_by_id(&mut conn, &id))
            .await
            .map_err(internal)?;
        Ok(row.map(AttendeeDto::from))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_event(
        &self,
        ctx: &Context<'_>,
        input: CreateEventCommand,
    ) -> async_graphql::Result<EventDto> {
        input.validate().map_err(invalid)?;
        let pool = ctx.data_unchecked::<DbPool>();
        let mailer = ctx.data_unchecked::<Arc<Mailer>>();
        event_handlers::create_event(pool, mailer, input)
            .await
            .map_err(internal)
    }

    async fn update_event(
        &self,
        ctx: &Context<'_>,
        input: UpdateEventCommand,
    ) -> async_graphql::Result<Option<EventDto>> {
        input.validate().map_err(invalid)?;
        let pool = ctx.data_unchecked::<DbPool>();
        let mailer = ctx.data_unchecked::<Arc<Mailer>>();
        event_handlers::update_event(pool, mailer, input)
            .await
            .map_err(internal)
    }

    async fn delete_event(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<bool> {
        let pool = ctx.data_unchecked::<DbPool>();
        event_handlers::delete_event(pool, id).await.map_err(internal)
    }

    async fn update_attendee_status(
        &self,
        ctx: &Context<'_>,
        input: UpdateAttendeeStatusCommand,
    ) -> async_graphql::Result<Option<AttendeeDto>> {
        let pool = ctx.data_unchecked::<DbPool>();
        let mailer = ctx.data_unchecked::<Arc<Mailer>>();
        attendee_handlers::update_attendee_status(pool, mailer, input)
            .await
            .map_err(internal)
    }

    async fn create_patient(
        &self,
        ctx: &Context<'_>,
        input: CreatePatientCommand,
    ) -> async_graphql::Result<PatientDto> {
        input.validate().map_err(invalid)?;
        let pool = ctx.data_unchecked::<DbPool>();
        patient_handlers::create_patient(pool, input)
            .await
            .map_err(internal)
    }
}
