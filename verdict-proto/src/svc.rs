//! Bindings for the `verdict.svc.v1` package: typed client and server
//! stubs for the policy decision API.

pub mod v1 {
    /// Client stub for `verdict.svc.v1.VerdictService`.
    pub mod verdict_service_client {
        use tonic::codegen::http::Uri;
        use tonic::codegen::*;

        use crate::{request, response};

        /// A typed client for the Verdict policy decision API.
        ///
        /// Generic over the underlying transport so it works with a real
        /// `tonic::transport::Channel` as well as an in-process tower
        /// service.
        #[derive(Debug, Clone)]
        pub struct VerdictServiceClient<T> {
            inner: tonic::client::Grpc<T>,
        }

        impl<T> VerdictServiceClient<T>
        where
            T: tonic::client::GrpcService<tonic::body::Body>,
            T::Error: Into<StdError>,
            T::ResponseBody: Body<Data = Bytes> + Send + 'static,
            <T::ResponseBody as Body>::Error: Into<StdError> + Send,
        {
            pub fn new(inner: T) -> Self {
                let inner = tonic::client::Grpc::new(inner);
                Self { inner }
            }

            pub fn with_origin(inner: T, origin: Uri) -> Self {
                let inner = tonic::client::Grpc::with_origin(inner, origin);
                Self { inner }
            }

            /// Enable decompressing responses.
            #[must_use]
            pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
                self.inner = self.inner.accept_compressed(encoding);
                self
            }

            /// Limits the maximum size of a decoded message.
            #[must_use]
            pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
                self.inner = self.inner.max_decoding_message_size(limit);
                self
            }

            /// Limits the maximum size of an encoded message.
            #[must_use]
            pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
                self.inner = self.inner.max_encoding_message_size(limit);
                self
            }

            pub async fn check_resources(
                &mut self,
                request: impl tonic::IntoRequest<request::v1::CheckResourcesRequest>,
            ) -> Result<tonic::Response<response::v1::CheckResourcesResponse>, tonic::Status>
            {
                self.inner.ready().await.map_err(|e| {
                    tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
                })?;
                let codec = tonic_prost::ProstCodec::default();
                let path = http::uri::PathAndQuery::from_static(
                    "/verdict.svc.v1.VerdictService/CheckResources",
                );
                let mut req = request.into_request();
                req.extensions_mut().insert(GrpcMethod::new(
                    "verdict.svc.v1.VerdictService",
                    "CheckResources",
                ));
                self.inner.unary(req, path, codec).await
            }

            pub async fn plan_resources(
                &mut self,
                request: impl tonic::IntoRequest<request::v1::PlanResourcesRequest>,
            ) -> Result<tonic::Response<response::v1::PlanResourcesResponse>, tonic::Status>
            {
                self.inner.ready().await.map_err(|e| {
                    tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
                })?;
                let codec = tonic_prost::ProstCodec::default();
                let path = http::uri::PathAndQuery::from_static(
                    "/verdict.svc.v1.VerdictService/PlanResources",
                );
                let mut req = request.into_request();
                req.extensions_mut().insert(GrpcMethod::new(
                    "verdict.svc.v1.VerdictService",
                    "PlanResources",
                ));
                self.inner.unary(req, path, codec).await
            }

            pub async fn server_info(
                &mut self,
                request: impl tonic::IntoRequest<request::v1::ServerInfoRequest>,
            ) -> Result<tonic::Response<response::v1::ServerInfoResponse>, tonic::Status>
            {
                self.inner.ready().await.map_err(|e| {
                    tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
                })?;
                let codec = tonic_prost::ProstCodec::default();
                let path = http::uri::PathAndQuery::from_static(
                    "/verdict.svc.v1.VerdictService/ServerInfo",
                );
                let mut req = request.into_request();
                req.extensions_mut().insert(GrpcMethod::new(
                    "verdict.svc.v1.VerdictService",
                    "ServerInfo",
                ));
                self.inner.unary(req, path, codec).await
            }
        }
    }

    /// Server stub for `verdict.svc.v1.VerdictService`, mainly useful for
    /// running an in-process service in tests.
    pub mod verdict_service_server {
        use tonic::codegen::*;

        use crate::{request, response};

        /// The server-side contract of the Verdict policy decision API.
        #[async_trait]
        pub trait VerdictService: Send + Sync + 'static {
            async fn check_resources(
                &self,
                request: tonic::Request<request::v1::CheckResourcesRequest>,
            ) -> Result<tonic::Response<response::v1::CheckResourcesResponse>, tonic::Status>;

            async fn plan_resources(
                &self,
                request: tonic::Request<request::v1::PlanResourcesRequest>,
            ) -> Result<tonic::Response<response::v1::PlanResourcesResponse>, tonic::Status>;

            async fn server_info(
                &self,
                request: tonic::Request<request::v1::ServerInfoRequest>,
            ) -> Result<tonic::Response<response::v1::ServerInfoResponse>, tonic::Status>;
        }

        /// Wraps a [`VerdictService`] implementation in a tower service
        /// speaking tonic's HTTP/2 framing.
        #[derive(Debug)]
        pub struct VerdictServiceServer<T> {
            inner: Arc<T>,
        }

        impl<T> VerdictServiceServer<T> {
            pub fn new(inner: T) -> Self {
                Self::from_arc(Arc::new(inner))
            }

            pub fn from_arc(inner: Arc<T>) -> Self {
                Self { inner }
            }
        }

        impl<T, B> Service<http::Request<B>> for VerdictServiceServer<T>
        where
            T: VerdictService,
            B: Body + Send + 'static,
            B::Error: Into<StdError> + Send + 'static,
        {
            type Response = http::Response<tonic::body::Body>;
            type Error = std::convert::Infallible;
            type Future = BoxFuture<Self::Response, Self::Error>;

            fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
                Poll::Ready(Ok(()))
            }

            fn call(&mut self, req: http::Request<B>) -> Self::Future {
                match req.uri().path() {
                    "/verdict.svc.v1.VerdictService/CheckResources" => {
                        struct CheckResourcesSvc<T>(Arc<T>);

                        impl<T: VerdictService>
                            tonic::server::UnaryService<request::v1::CheckResourcesRequest>
                            for CheckResourcesSvc<T>
                        {
                            type Response = response::v1::CheckResourcesResponse;
                            type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;

                            fn call(
                                &mut self,
                                request: tonic::Request<request::v1::CheckResourcesRequest>,
                            ) -> Self::Future {
                                let inner = Arc::clone(&self.0);
                                Box::pin(async move { inner.check_resources(request).await })
                            }
                        }

                        let inner = Arc::clone(&self.inner);
                        Box::pin(async move {
                            let codec = tonic_prost::ProstCodec::default();
                            let mut grpc = tonic::server::Grpc::new(codec);
                            Ok(grpc.unary(CheckResourcesSvc(inner), req).await)
                        })
                    }
                    "/verdict.svc.v1.VerdictService/PlanResources" => {
                        struct PlanResourcesSvc<T>(Arc<T>);

                        impl<T: VerdictService>
                            tonic::server::UnaryService<request::v1::PlanResourcesRequest>
                            for PlanResourcesSvc<T>
                        {
                            type Response = response::v1::PlanResourcesResponse;
                            type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;

                            fn call(
                                &mut self,
                                request: tonic::Request<request::v1::PlanResourcesRequest>,
                            ) -> Self::Future {
                                let inner = Arc::clone(&self.0);
                                Box::pin(async move { inner.plan_resources(request).await })
                            }
                        }

                        let inner = Arc::clone(&self.inner);
                        Box::pin(async move {
                            let codec = tonic_prost::ProstCodec::default();
                            let mut grpc = tonic::server::Grpc::new(codec);
                            Ok(grpc.unary(PlanResourcesSvc(inner), req).await)
                        })
                    }
                    "/verdict.svc.v1.VerdictService/ServerInfo" => {
                        struct ServerInfoSvc<T>(Arc<T>);

                        impl<T: VerdictService>
                            tonic::server::UnaryService<request::v1::ServerInfoRequest>
                            for ServerInfoSvc<T>
                        {
                            type Response = response::v1::ServerInfoResponse;
                            type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;

                            fn call(
                                &mut self,
                                request: tonic::Request<request::v1::ServerInfoRequest>,
                            ) -> Self::Future {
                                let inner = Arc::clone(&self.0);
                                Box::pin(async move { inner.server_info(request).await })
                            }
                        }

                        let inner = Arc::clone(&self.inner);
                        Box::pin(async move {
                            let codec = tonic_prost::ProstCodec::default();
                            let mut grpc = tonic::server::Grpc::new(codec);
                            Ok(grpc.unary(ServerInfoSvc(inner), req).await)
                        })
                    }
                    _ => Box::pin(async move {
                        let mut response = http::Response::new(tonic::body::Body::empty());
                        let headers = response.headers_mut();
                        headers.insert("grpc-status", http::HeaderValue::from_static("12"));
                        headers.insert(
                            "content-type",
                            http::HeaderValue::from_static("application/grpc"),
                        );
                        Ok(response)
                    }),
                }
            }
        }

        impl<T> Clone for VerdictServiceServer<T> {
            fn clone(&self) -> Self {
                Self {
                    inner: Arc::clone(&self.inner),
                }
            }
        }

        /// Full gRPC service name.
        pub const SERVICE_NAME: &str = "verdict.svc.v1.VerdictService";

        impl<T> tonic::server::NamedService for VerdictServiceServer<T> {
            const NAME: &'static str = SERVICE_NAME;
        }
    }
}
