//! Tool Router - builds the rmcp ToolRouter from the tool registry.
//!
//! Every registered tool becomes one route whose handler forwards the call to
//! the dispatcher, so STDIO/TCP calls and HTTP calls share the same argument
//! transformation and result normalization.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::dispatcher::Dispatcher;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(dispatcher: Dispatcher) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    dispatcher
        .registry()
        .get_all_tools()
        .into_iter()
        .fold(ToolRouter::new(), |router, tool| {
            let name = tool.name.to_string();
            let dispatcher = dispatcher.clone();

            router.with_route(ToolRoute::new_dyn(
                tool,
                move |ctx: ToolCallContext<'_, S>| {
                    let args = ctx.arguments.clone();
                    let name = name.clone();
                    let dispatcher = dispatcher.clone();
                    async move {
                        dispatcher
                            .invoke(&name, args)
                            .await
                            .map_err(|e| McpError::invalid_params(e.to_string(), None))
                    }
                    .boxed()
                },
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::registry::{ToolDescriptor, ToolRegistry, ToolReply};
    use schemars::JsonSchema;
    use serde::Deserialize;
    use std::sync::Arc;

    struct TestServer {}

    #[derive(Deserialize, JsonSchema)]
    struct NoParams {}

    fn tool(name: &str) -> ToolDescriptor {
        ToolDescriptor::new::<NoParams, _, _>(name, |_| async { Ok(ToolReply::text("ok")) })
    }

    #[test]
    fn test_build_router() {
        let registry = ToolRegistry::builder()
            .register(tool("first"))
            .unwrap()
            .register(tool("second"))
            .unwrap()
            .build();
        let dispatcher = Dispatcher::new(Arc::new(registry));

        let router: ToolRouter<TestServer> = build_tool_router(dispatcher.clone());
        let tools = router.list_all();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"first"));
        assert!(names.contains(&"second"));
    }

    #[test]
    fn test_router_matches_registry() {
        let registry = ToolRegistry::builder()
            .register(tool("only"))
            .unwrap()
            .build();
        let dispatcher = Dispatcher::new(Arc::new(registry));

        let router: ToolRouter<TestServer> = build_tool_router(dispatcher.clone());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(dispatcher.registry().tool_names(), router_names);
    }
}
