//! Example: production and development environments side by side.
//!
//! A public EKS cluster serving three web services backed by a replicated
//! RDS setup, mirrored by a development environment inside a VPC, with a
//! CI/CD pipeline pushing images to both.

use stratus::{
    Diagram, Edge, NodeHandle, Scope, StratusError,
    kind::{aws, programming},
};

/// One web service: a React frontend linked to its Node.js backend.
fn web_service(
    scope: &mut Scope<'_>,
    name: &str,
) -> Result<(NodeHandle, NodeHandle), StratusError> {
    scope.cluster(name, |ws| {
        let frontend = ws.node(programming::framework::REACT, "React Frontend");
        let backend = ws.node(programming::language::NODEJS, "Node.js Server");
        ws.connect(frontend, backend, Edge::undirected())?;
        Ok((frontend, backend))
    })
}

fn main() -> Result<(), StratusError> {
    let mut diagram = Diagram::builder("Complete Architecture").build()?;

    let user = diagram.node(aws::general::USER, "User");
    let developer = diagram.node(aws::general::USER, "Developer");

    let dns = diagram.cluster("AWS Cloud", |cloud| -> Result<NodeHandle, StratusError> {
        let dns = cloud.node(aws::network::ROUTE53, "DNS");
        let waf = cloud.node(aws::security::WAF, "Web Application Firewall");
        let lb = cloud.node(aws::network::ELB, "Load Balancer");

        let services = cloud.cluster(
            "Public EKS Cluster",
            |eks| -> Result<[(NodeHandle, NodeHandle); 3], StratusError> {
                eks.node(aws::compute::EKS, "EKS");
                Ok([
                    web_service(eks, "Web Service 1")?,
                    web_service(eks, "Web Service 2")?,
                    web_service(eks, "Web Service 3")?,
                ])
            },
        )?;

        let (db_primary, db_replicas) = cloud.cluster("RDS Cluster", |rds| {
            rds.node(aws::database::RDS_INSTANCE, "RDS");
            let primary = rds.node(aws::database::RDS, "Primary DB");
            let replicas = vec![
                rds.node(aws::database::RDS, "Replica DB1"),
                rds.node(aws::database::RDS, "Replica DB2"),
            ];
            (primary, replicas)
        });

        cloud.connect_chain(&[dns, waf, lb], Edge::new())?;
        for (frontend, _) in &services {
            cloud.connect(lb, *frontend, Edge::new())?;
        }
        for (_, backend) in &services {
            cloud.connect(*backend, db_primary, Edge::new())?;
        }
        cloud.connect(db_primary, &db_replicas, Edge::new())?;

        cloud.cluster("VPC", |vpc| -> Result<(), StratusError> {
            let dev_services = vpc.cluster(
                "Development EKS Cluster",
                |eks| -> Result<[(NodeHandle, NodeHandle); 3], StratusError> {
                    eks.node(aws::compute::EKS, "EKS");
                    Ok([
                        web_service(eks, "Dev Web Service 1")?,
                        web_service(eks, "Dev Web Service 2")?,
                        web_service(eks, "Dev Web Service 3")?,
                    ])
                },
            )?;

            let (dev_primary, dev_replicas) = vpc.cluster("Development RDS Cluster", |rds| {
                rds.node(aws::database::RDS_INSTANCE, "RDS");
                let primary = rds.node(aws::database::RDS, "Dev Primary DB");
                let replicas = vec![
                    rds.node(aws::database::RDS, "Dev Replica DB1"),
                    rds.node(aws::database::RDS, "Dev Replica DB2"),
                ];
                (primary, replicas)
            });

            let (code_pipeline, code_build, ecr) = vpc.cluster("CI/CD Pipeline", |ci| {
                (
                    ci.node(aws::devtools::CODEPIPELINE, "CodePipeline"),
                    ci.node(aws::devtools::CODEBUILD, "CodeBuild"),
                    ci.node(aws::compute::ECR, "Elastic Container Registry"),
                )
            });

            vpc.connect_chain(&[developer, code_pipeline, code_build, ecr], Edge::new())?;

            let dev_backends: Vec<_> = dev_services.iter().map(|(_, backend)| *backend).collect();
            let backends: Vec<_> = services.iter().map(|(_, backend)| *backend).collect();
            vpc.connect(ecr, &dev_backends, Edge::new())?;
            vpc.connect(ecr, &backends, Edge::new())?;

            vpc.connect(&dev_backends, dev_primary, Edge::new())?;
            vpc.connect(dev_primary, &dev_replicas, Edge::new())?;
            Ok(())
        })?;

        Ok(dns)
    })?;

    diagram.connect(user, dns, Edge::new())?;

    let path = diagram.render()?;
    println!("diagram written to {}", path.display());
    Ok(())
}
