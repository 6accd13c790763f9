use std::sync::{Arc, Mutex};

use tonic::{transport::Server, Request, Response, Status};

use pathd_proto::pathd::{
    bgp_api_server::{BgpApi, BgpApiServer},
    AddPathRequest, DeletePathRequest, Path,
};

#[derive(Clone, Debug, Default)]
pub struct MockBgpApiServer {
    inner: Arc<Mutex<MockBgpApiServerInner>>,
}

#[derive(Clone, Debug, Default)]
pub struct MockBgpApiServerInner {
    pub paths: Vec<Path>,
    pub deleted: Vec<Path>,
    // When set, every mutation is answered with this rejection.
    pub reject: Option<String>,
}

impl MockBgpApiServer {
    fn new_with(inner: Arc<Mutex<MockBgpApiServerInner>>) -> Self {
        Self { inner }
    }
}

pub async fn run_with(inner: Arc<Mutex<MockBgpApiServerInner>>, port: u32) {
    let sock_addr = format!("127.0.0.1:{port}").parse().unwrap();

    Server::builder()
        .add_service(BgpApiServer::new(MockBgpApiServer::new_with(inner)))
        .serve(sock_addr)
        .await
        .unwrap();
}

#[tonic::async_trait]
impl BgpApi for MockBgpApiServer {
    async fn add_path(&self, req: Request<AddPathRequest>) -> Result<Response<()>, Status> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(msg) = &inner.reject {
            return Err(Status::aborted(msg.clone()));
        }
        let path = match &req.get_ref().path {
            Some(path) => path.clone(),
            None => return Err(Status::aborted("path is required")),
        };
        inner.paths.push(path);
        Ok(Response::new(()))
    }

    async fn delete_path(&self, req: Request<DeletePathRequest>) -> Result<Response<()>, Status> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(msg) = &inner.reject {
            return Err(Status::aborted(msg.clone()));
        }
        let path = match &req.get_ref().path {
            Some(path) => path.clone(),
            None => return Err(Status::aborted("path is required")),
        };
        inner.paths.retain(|p| p.prefix != path.prefix);
        inner.deleted.push(path);
        Ok(Response::new(()))
    }
}
