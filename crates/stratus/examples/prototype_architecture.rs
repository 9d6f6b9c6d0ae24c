//! Example: prototype environment rendered left-to-right.
//!
//! Two demo apps behind an ingress controller inside a VPC, with a per-app
//! CI/CD pipeline publishing images to ECR and build artifacts to S3.

use stratus::{
    Diagram, Direction, Edge, NodeHandle, StratusError,
    kind::{aws, k8s, onprem},
};

struct VpcHandles {
    lb: NodeHandle,
    vpc: NodeHandle,
    backends: [NodeHandle; 2],
}

/// CI/CD handles: per-app pipelines, per-app builds, the registry, and the
/// artifact store.
type Pipelines = ([NodeHandle; 2], [NodeHandle; 2], NodeHandle, NodeHandle);

fn main() -> Result<(), StratusError> {
    let mut diagram = Diagram::builder("Prototype Architecture")
        .direction(Direction::LeftRight)
        .graph_attr("fontsize", "24")
        .node_attr("fontsize", "16")
        .cluster_attr("fontsize", "20")
        .build()?;

    let user = diagram.node(onprem::client::USERS, "User");
    let developer = diagram.node(onprem::client::USERS, "Developer");

    let (handles, pipelines) = diagram.cluster(
        "AWS Cloud",
        |cloud| -> Result<(VpcHandles, Pipelines), StratusError> {
            let igw = cloud.node(aws::network::INTERNET_GATEWAY, "Internet Gateway");

            let handles = cloud.cluster("VPC", |vpc_scope| -> Result<VpcHandles, StratusError> {
                let vpc = vpc_scope.node(aws::network::VPC, "Main VPC");

                let lb = vpc_scope.cluster("Public Subnet", |public| {
                    let subnet = public.node(aws::network::PUBLIC_SUBNET, "Public Subnet");
                    let lb = public.node(aws::network::ELB, "Load Balancer");
                    public.connect(subnet, lb, Edge::undirected()).map(|()| lb)
                })?;

                let backends = vpc_scope.cluster(
                    "Private Subnet",
                    |private| -> Result<[NodeHandle; 2], StratusError> {
                        private.node(aws::network::PRIVATE_SUBNET, "Private Subnet");

                        let (ingress, backends) = private.cluster("EKS Cluster", |eks| {
                            eks.node(aws::compute::EKS, "EKS");
                            let ingress = eks.node(k8s::network::INGRESS, "Ingress Controller");
                            let backend1 = eks.cluster("Demo App 1", |app| {
                                app.node(k8s::compute::POD, "Node.js Server")
                            });
                            let backend2 = eks.cluster("Demo App 2", |app| {
                                app.node(k8s::compute::POD, "Node.js Server")
                            });
                            (ingress, [backend1, backend2])
                        });

                        let db_primary = private.cluster("RDS Instance", |rds| {
                            rds.node(aws::database::RDS, "Primary DB")
                        });

                        private.connect(lb, ingress, Edge::new())?;
                        private.connect(ingress, backends, Edge::new())?;
                        private.connect(backends, db_primary, Edge::new())?;
                        Ok(backends)
                    },
                )?;

                Ok(VpcHandles { lb, vpc, backends })
            })?;

            cloud.connect(user, handles.lb, Edge::new())?;
            cloud.connect(handles.vpc, igw, Edge::undirected())?;

            let pipelines = cloud.cluster("CI/CD Pipeline", |ci| {
                let pipeline_1 = ci.node(aws::devtools::CODEPIPELINE, "CodePipeline App 1");
                let build_1 = ci.node(aws::devtools::CODEBUILD, "CodeBuild App 1");
                let pipeline_2 = ci.node(aws::devtools::CODEPIPELINE, "CodePipeline App 2");
                let build_2 = ci.node(aws::devtools::CODEBUILD, "CodeBuild App 2");
                let ecr = ci.node(aws::compute::ECR, "Elastic Container Registry");
                let s3 = ci.node(aws::storage::S3, "S3 Artifact Store");
                ([pipeline_1, pipeline_2], [build_1, build_2], ecr, s3)
            });

            Ok((handles, pipelines))
        },
    )?;

    let (pipeline_nodes, build_nodes, ecr, s3) = pipelines;

    let repo_1 = diagram.node(onprem::vcs::GITHUB, "Demo App 1 Repo");
    let repo_2 = diagram.node(onprem::vcs::GITHUB, "Demo App 2 Repo");

    diagram.connect(developer, [repo_1, repo_2], Edge::new())?;
    diagram.connect_chain(&[repo_1, pipeline_nodes[0], build_nodes[0], ecr], Edge::new())?;
    diagram.connect_chain(&[repo_2, pipeline_nodes[1], build_nodes[1], ecr], Edge::new())?;

    diagram.connect(ecr, handles.backends, Edge::new())?;
    diagram.connect(build_nodes[0], s3, Edge::new())?;
    diagram.connect(build_nodes[1], s3, Edge::new())?;

    let path = diagram.render()?;
    println!("diagram written to {}", path.display());
    Ok(())
}
