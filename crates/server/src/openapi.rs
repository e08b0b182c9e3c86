use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::{auth, expenses, groups, payments};
use crate::serializers;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct RegisterRequest { pub email: String, pub name: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::groups::create,
        crate::routes::groups::list,
        crate::routes::groups::update,
        crate::routes::groups::delete,
        crate::routes::groups::list_members,
        crate::routes::groups::add_member,
        crate::routes::groups::leave,
        crate::routes::groups::remove_member,
        crate::routes::payments::list,
        crate::routes::payments::record,
        crate::routes::expenses::create,
        crate::routes::expenses::list,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            auth::RegisterOutput,
            auth::LoginOutput,
            groups::CreateGroupRequest,
            groups::UpdateGroupRequest,
            groups::AddMemberRequest,
            payments::RecordPaymentRequest,
            expenses::CreateExpenseRequest,
            serializers::MessageResponse,
            serializers::groups::CreatedGroup,
            serializers::groups::GroupListItem,
            serializers::groups::GroupDetails,
            serializers::groups::UpdatedGroup,
            serializers::groups::MemberView,
            serializers::groups::MemberAdded,
            serializers::payments::PaymentView,
            serializers::expenses::ExpenseView,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "groups"),
        (name = "payments"),
        (name = "expenses")
    )
)]
pub struct ApiDoc;
