use crate::{analyze, info};
use roast_core::analysis::pnl::PnlResult;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(info::handler::info, analyze::handler::analyze,),
    components(schemas(
        info::dto::Info,
        analyze::dto::AnalyzeRequest,
        analyze::dto::AnalyzeResponse,
        PnlResult
    ))
)]
pub struct ApiDoc;
